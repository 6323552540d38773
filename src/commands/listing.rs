use std::fmt::Write;

use super::{Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    error::{CommandError, CommandResult, QueueError},
};

const QUEUED_AT_FORMAT: &str = "%H:%M:%S UTC";

/// Describes the playing track.
pub struct CurrentTrackCommand {
    descriptor: CommandDescriptor,
}

impl CurrentTrackCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for CurrentTrackCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, _message: &IncomingMessage) -> CommandResult<Execution> {
        let current = state.queue.current().ok_or(CommandError::NothingPlaying)?;

        Ok(Execution::public(
            state.clone(),
            format!(
                "🎵 Now playing {}, queued at {}.",
                current.track,
                current.added_at.format(QUEUED_AT_FORMAT)
            ),
        ))
    }
}

/// Lists queued tracks, optionally limited to the first N.
pub struct ListTracksCommand {
    descriptor: CommandDescriptor,
    max_listed: usize,
}

impl ListTracksCommand {
    pub fn new(descriptor: CommandDescriptor, max_listed: usize) -> Self {
        Self {
            descriptor,
            max_listed,
        }
    }
}

impl Command for ListTracksCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let limit = match message.args().first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(limit) if limit > 0 => limit.min(self.max_listed),
                _ => {
                    return Err(CommandError::invalid_argument(format!(
                        "`{arg}` is not a valid number of tracks"
                    )))
                }
            },
            None => self.max_listed,
        };

        let entries = state.queue.snapshot();
        if entries.is_empty() {
            return Err(QueueError::EmptyQueue.into());
        }

        let playing = state.queue.current().map(|entry| entry.id);
        let mut reply = format!(
            "📋 {} tracks, {} total:",
            entries.len(),
            humantime::format_duration(state.queue.total_duration())
        );
        for (position, entry) in entries.iter().take(limit).enumerate() {
            let marker = if Some(entry.id) == playing { "▶️ " } else { "" };
            let _ = write!(reply, "\n{}. {}{}", position + 1, marker, entry.track);
        }
        if entries.len() > limit {
            let _ = write!(reply, "\n... and {} more", entries.len() - limit);
        }

        Ok(Execution::public(state.clone(), reply))
    }
}

/// Reports how many tracks are queued.
pub struct NumTracksCommand {
    descriptor: CommandDescriptor,
}

impl NumTracksCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for NumTracksCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, _message: &IncomingMessage) -> CommandResult<Execution> {
        let reply = match state.queue.len() {
            0 => "📭 There are no tracks in the queue.".to_string(),
            1 => "There is 1 track in the queue.".to_string(),
            len => format!("There are {len} tracks in the queue."),
        };

        Ok(Execution::public(state.clone(), reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{descriptor, message, state_with};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_current_track_when_idle() {
        let state = state_with(2);

        let result = CurrentTrackCommand::new(descriptor("currenttrack", false))
            .execute(&state, &message("bob", "!currenttrack"));

        assert_eq!(result.unwrap_err(), CommandError::NothingPlaying);
    }

    #[test]
    fn test_current_track() {
        let state = state_with(2);
        let playing = state.queue.advance().unwrap();

        let execution = CurrentTrackCommand::new(descriptor("currenttrack", false))
            .execute(&state, &message("bob", "!currenttrack"))
            .unwrap();

        assert_eq!(
            execution.message,
            format!(
                "🎵 Now playing \"A\" (3m 20s) added by alice, queued at {}.",
                playing.added_at.format("%H:%M:%S UTC")
            )
        );
    }

    #[test]
    fn test_list_tracks_marks_playing_entry_and_truncates() {
        let state = state_with(4);
        state.queue.advance();

        let execution = ListTracksCommand::new(descriptor("listtracks", false), 50)
            .execute(&state, &message("bob", "!listtracks 2"))
            .unwrap();

        let lines: Vec<&str> = execution.message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1. ▶️ \"A\" (3m 20s) added by alice");
        assert_eq!(lines[2], "2. \"B\" (3m 20s) added by alice");
        assert_eq!(lines[3], "... and 2 more");
    }

    #[test]
    fn test_list_tracks_caps_at_configured_maximum() {
        let state = state_with(5);

        let execution = ListTracksCommand::new(descriptor("listtracks", false), 3)
            .execute(&state, &message("bob", "!listtracks 100"))
            .unwrap();

        assert!(execution.message.ends_with("... and 2 more"));
    }

    #[test]
    fn test_list_tracks_errors() {
        let command = ListTracksCommand::new(descriptor("listtracks", false), 50);

        assert_eq!(
            command
                .execute(&state_with(0), &message("bob", "!listtracks"))
                .unwrap_err(),
            CommandError::Queue(QueueError::EmptyQueue)
        );
        assert!(matches!(
            command.execute(&state_with(3), &message("bob", "!listtracks lots")),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_num_tracks() {
        let command = NumTracksCommand::new(descriptor("numtracks", false));

        let empty = command
            .execute(&state_with(0), &message("bob", "!numtracks"))
            .unwrap();
        let three = command
            .execute(&state_with(3), &message("bob", "!numtracks"))
            .unwrap();

        assert_eq!(empty.message, "📭 There are no tracks in the queue.");
        assert_eq!(three.message, "There are 3 tracks in the queue.");
    }
}
