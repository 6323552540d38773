use tracing::info;

use super::{Command, CommandDescriptor, Execution};
use crate::{
    audio::AudioTrack,
    bot::{BotState, IncomingMessage},
    error::{CommandError, CommandResult},
};

fn describe_added(sender: &str, tracks: &[AudioTrack], len: usize) -> String {
    match tracks {
        [track] => format!("➕ {sender} added \"{}\" ({len} in queue).", track.title()),
        _ => format!("➕ {sender} added {} tracks ({len} in queue).", tracks.len()),
    }
}

/// Appends the tracks resolved for the message to the end of the queue.
pub struct AddCommand {
    descriptor: CommandDescriptor,
}

impl AddCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for AddCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        if message.tracks.is_empty() {
            return Err(CommandError::NoTracks);
        }

        let len = state.queue.add_tracks(message.tracks.iter().cloned());
        info!("➕ {} queued {} tracks", message.sender, message.tracks.len());

        Ok(Execution::public(
            state.clone(),
            describe_added(&message.sender, &message.tracks, len),
        ))
    }
}

/// Inserts the resolved tracks right after the playing one.
pub struct AddNextCommand {
    descriptor: CommandDescriptor,
}

impl AddNextCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Command for AddNextCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        if message.tracks.is_empty() {
            return Err(CommandError::NoTracks);
        }

        let len = state.queue.insert_next(message.tracks.iter().cloned());

        Ok(Execution::public(
            state.clone(),
            format!("⏫ {}", describe_added(&message.sender, &message.tracks, len)),
        ))
    }
}
