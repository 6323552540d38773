use tracing::info;

use super::{Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    error::CommandResult,
};

/// Randomizes the order of the whole queue.
pub struct ShuffleCommand {
    descriptor: CommandDescriptor,
}

impl ShuffleCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for ShuffleCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        state.queue.shuffle()?;
        info!("🔀 {} shuffled the queue in {}", message.sender, state.session.channel);

        Ok(Execution::public(
            state.clone(),
            format!(
                "🔀 {} shuffled the queue ({} tracks).",
                message.sender,
                state.queue.len()
            ),
        ))
    }
}
