use super::{Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    config::VolumeConfig,
    error::{CommandError, CommandResult},
};

/// `volume` reports the level, `volume <level>` changes it.
pub struct VolumeCommand {
    descriptor: CommandDescriptor,
    lowest: f32,
    highest: f32,
}

impl VolumeCommand {
    pub fn new(descriptor: CommandDescriptor, bounds: &VolumeConfig) -> Self {
        Self {
            descriptor,
            lowest: bounds.lowest,
            highest: bounds.highest,
        }
    }
}

impl Command for VolumeCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let Some(arg) = message.args().first().copied() else {
            return Ok(Execution::public(
                state.clone(),
                format!("🔊 The volume is {:.2}.", state.volume),
            ));
        };

        let requested: f32 = arg
            .parse()
            .map_err(|_| CommandError::invalid_argument(format!("`{arg}` is not a volume level")))?;

        if !(self.lowest..=self.highest).contains(&requested) {
            return Err(CommandError::VolumeOutOfRange {
                requested,
                lowest: self.lowest,
                highest: self.highest,
            });
        }

        let mut next = state.clone();
        next.volume = requested;

        Ok(Execution::public(
            next,
            format!("🔊 {} set the volume to {:.2}.", message.sender, requested),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{descriptor, message, state_with};
    use pretty_assertions::assert_eq;

    fn command() -> VolumeCommand {
        VolumeCommand::new(
            descriptor("volume", false),
            &VolumeConfig {
                default: 0.4,
                lowest: 0.1,
                highest: 0.8,
            },
        )
    }

    #[test]
    fn test_report_volume() {
        let execution = command()
            .execute(&state_with(0), &message("bob", "!volume"))
            .unwrap();

        assert_eq!(execution.message, "🔊 The volume is 0.40.");
    }

    #[test]
    fn test_set_volume() {
        let state = state_with(0);

        let execution = command()
            .execute(&state, &message("bob", "!volume 0.6"))
            .unwrap();

        assert_eq!(execution.state.volume, 0.6);
        assert_eq!(state.volume, 0.4);
    }

    #[test]
    fn test_volume_out_of_range() {
        let result = command().execute(&state_with(0), &message("bob", "!volume 2"));

        assert_eq!(
            result.unwrap_err(),
            CommandError::VolumeOutOfRange {
                requested: 2.0,
                lowest: 0.1,
                highest: 0.8,
            }
        );
    }

    #[test]
    fn test_volume_not_a_number() {
        let result = command().execute(&state_with(0), &message("bob", "!volume loud"));

        assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    }
}
