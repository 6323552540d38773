use tracing::info;

use super::{parse_position, Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    error::{CommandResult, QueueError},
};

/// `move <from> <to>`, positions counted from 1.
pub struct MoveCommand {
    descriptor: CommandDescriptor,
}

impl MoveCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for MoveCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let args = message.args();
        let from = parse_position(args.first().copied())?;
        let to = parse_position(args.get(1).copied())?;

        state.queue.move_track(from, to)?;

        let moved = state
            .queue
            .snapshot()
            .get(to)
            .map(|entry| entry.track.title().to_string())
            .unwrap_or_default();

        Ok(Execution::public(
            state.clone(),
            format!("📍 {} moved \"{}\" to position {}.", message.sender, moved, to + 1),
        ))
    }
}

/// `remove <position>`, counted from 1.
pub struct RemoveCommand {
    descriptor: CommandDescriptor,
}

impl RemoveCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for RemoveCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let index = parse_position(message.args().first().copied())?;
        let removed = state.queue.remove_track(index)?;

        Ok(Execution::public(
            state.clone(),
            format!(
                "❌ {} removed \"{}\" from the queue.",
                message.sender,
                removed.track.title()
            ),
        ))
    }
}

/// Empties the queue.
pub struct ResetCommand {
    descriptor: CommandDescriptor,
}

impl ResetCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for ResetCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        if state.queue.is_empty() {
            return Err(QueueError::EmptyQueue.into());
        }

        let dropped = state.queue.reset();
        info!("🗑️ {} reset the queue in {}", message.sender, state.session.channel);

        let mut next = state.clone();
        next.skip_votes.clear();

        Ok(Execution::public(
            next,
            format!("🗑️ {} cleared the queue ({dropped} tracks removed).", message.sender),
        ))
    }
}
