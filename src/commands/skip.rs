use tracing::info;

use super::{Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    error::{CommandError, CommandResult},
};

/// Vote-based skip of the playing track.
pub struct SkipCommand {
    descriptor: CommandDescriptor,
    skip_ratio: f32,
}

impl SkipCommand {
    pub fn new(descriptor: CommandDescriptor, skip_ratio: f32) -> Self {
        Self {
            descriptor,
            skip_ratio,
        }
    }

    /// Votes needed for a roster of `listeners` users.
    fn votes_needed(&self, listeners: usize) -> usize {
        ((listeners.max(1) as f32) * self.skip_ratio).ceil().max(1.0) as usize
    }
}

impl Command for SkipCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let current = state.queue.current().ok_or(CommandError::NothingPlaying)?;

        let mut next = state.clone();
        if !next.skip_votes.cast(current.id, &message.sender) {
            return Err(CommandError::AlreadyVoted);
        }

        let votes = next.skip_votes.count_for(current.id);
        let needed = self.votes_needed(next.session.roster.len());

        if votes < needed {
            return Ok(Execution::public(
                next,
                format!(
                    "🗳️ {} voted to skip \"{}\" ({votes}/{needed}).",
                    message.sender,
                    current.track.title()
                ),
            ));
        }

        if !next.queue.advance_past(current.id) {
            return Err(CommandError::NothingPlaying);
        }
        next.skip_votes.clear();
        info!("⏭️ Vote skip passed for {}", current.track.title());

        Ok(Execution::public(
            next,
            format!(
                "⏭️ Enough votes, skipping \"{}\".",
                current.track.title()
            ),
        ))
    }
}

/// Skips the playing track without a vote.
pub struct ForceSkipCommand {
    descriptor: CommandDescriptor,
}

impl ForceSkipCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for ForceSkipCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let skipped = state
            .queue
            .skip_current()
            .ok_or(CommandError::NothingPlaying)?;

        let mut next = state.clone();
        next.skip_votes.clear();

        Ok(Execution::public(
            next,
            format!(
                "⏭️ {} skipped \"{}\".",
                message.sender,
                skipped.track.title()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::SkipVotes,
        commands::test_support::{descriptor, message, state_with, titles},
    };
    use pretty_assertions::assert_eq;

    fn playing_state(count: usize) -> BotState {
        let state = state_with(count);
        state.queue.advance();
        state
    }

    #[test]
    fn test_votes_needed() {
        let command = SkipCommand::new(descriptor("skip", false), 0.5);

        assert_eq!(command.votes_needed(0), 1);
        assert_eq!(command.votes_needed(1), 1);
        assert_eq!(command.votes_needed(4), 2);
        assert_eq!(command.votes_needed(5), 3);
    }

    #[test]
    fn test_skip_without_playing_track() {
        let result = SkipCommand::new(descriptor("skip", false), 0.5)
            .execute(&state_with(2), &message("bob", "!skip"));

        assert_eq!(result.unwrap_err(), CommandError::NothingPlaying);
    }

    #[test]
    fn test_skip_vote_then_pass() {
        let command = SkipCommand::new(descriptor("skip", false), 0.5);
        let state = playing_state(3);

        // Roster of 4 needs 2 votes.
        let first = command.execute(&state, &message("bob", "!skip")).unwrap();
        assert_eq!(first.message, "🗳️ bob voted to skip \"A\" (1/2).");
        assert_eq!(titles(&first.state), vec!["A", "B", "C"]);

        assert_eq!(
            command
                .execute(&first.state, &message("bob", "!skip"))
                .unwrap_err(),
            CommandError::AlreadyVoted
        );

        let second = command
            .execute(&first.state, &message("carol", "!skip"))
            .unwrap();
        assert_eq!(titles(&second.state), vec!["B", "C"]);
        assert_eq!(
            second.state.queue.current().unwrap().track.title(),
            "B"
        );
        assert_eq!(second.state.skip_votes, SkipVotes::default());
    }

    #[test]
    fn test_force_skip() {
        let state = playing_state(2);

        let execution = ForceSkipCommand::new(descriptor("forceskip", true))
            .execute(&state, &message("admin", "!forceskip"))
            .unwrap();

        assert_eq!(execution.message, "⏭️ admin skipped \"A\".");
        assert_eq!(titles(&execution.state), vec!["B"]);
    }

    #[test]
    fn test_force_skip_publishes_next_entry() {
        let state = playing_state(3);
        let mut now_playing = state.queue.subscribe();

        ForceSkipCommand::new(descriptor("forceskip", true))
            .execute(&state, &message("admin", "!forceskip"))
            .unwrap();

        assert!(now_playing.has_changed().unwrap());
        let playing = now_playing.borrow_and_update().clone().unwrap();
        assert_eq!(playing.track.title(), "B");
    }

    #[test]
    fn test_force_skip_without_playing_track() {
        let state = state_with(2);

        let result = ForceSkipCommand::new(descriptor("forceskip", true))
            .execute(&state, &message("admin", "!forceskip"));

        assert_eq!(result.unwrap_err(), CommandError::NothingPlaying);
        assert_eq!(titles(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_vote_skip_publishes_next_entry() {
        let command = SkipCommand::new(descriptor("skip", false), 0.25);
        let state = playing_state(2);
        let now_playing = state.queue.subscribe();

        let execution = command.execute(&state, &message("bob", "!skip")).unwrap();

        assert_eq!(execution.message, "⏭️ Enough votes, skipping \"A\".");
        assert_eq!(
            now_playing.borrow().as_ref().map(|entry| entry.track.title()),
            Some("B")
        );
    }
}
