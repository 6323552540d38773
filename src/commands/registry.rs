use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

use super::{
    add::{AddCommand, AddNextCommand},
    edit::{MoveCommand, RemoveCommand, ResetCommand},
    help::HelpCommand,
    listing::{CurrentTrackCommand, ListTracksCommand, NumTracksCommand},
    shuffle::ShuffleCommand,
    skip::{ForceSkipCommand, SkipCommand},
    volume::VolumeCommand,
    Command, CommandDescriptor,
};
use crate::{config::BotConfig, error::ConfigError};

/// Every command the bot knows, addressable by any of its aliases.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    aliases: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Builds the registry from a fixed set of commands.
    ///
    /// Aliases are matched case-insensitively; two commands claiming the same
    /// alias is a configuration error.
    pub fn new(commands: Vec<Arc<dyn Command>>) -> Result<Self, ConfigError> {
        let mut aliases = HashMap::new();

        for (index, command) in commands.iter().enumerate() {
            for alias in command.aliases() {
                let normalized = alias.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "command `{}` has a blank alias",
                        command.name()
                    )));
                }

                if let Some(previous) = aliases.insert(normalized.clone(), index) {
                    let first: &Arc<dyn Command> = &commands[previous];
                    return Err(ConfigError::DuplicateAlias {
                        alias: normalized,
                        first: first.name().to_string(),
                        second: command.name().to_string(),
                    });
                }
            }
        }

        info!(
            "📝 Registered {} commands under {} aliases",
            commands.len(),
            aliases.len()
        );
        Ok(Self { commands, aliases })
    }

    /// Builds the full command set from configuration.
    pub fn from_config(config: &BotConfig) -> Result<Self, ConfigError> {
        let descriptor = |name: &str| -> Result<CommandDescriptor, ConfigError> {
            Ok(CommandDescriptor::from_config(name, config.command(name)?))
        };

        let mut commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(AddCommand::new(descriptor("add")?)),
            Arc::new(AddNextCommand::new(descriptor("addnext")?)),
            Arc::new(CurrentTrackCommand::new(descriptor("currenttrack")?)),
            Arc::new(ListTracksCommand::new(
                descriptor("listtracks")?,
                config.general.max_tracks_listed,
            )),
            Arc::new(NumTracksCommand::new(descriptor("numtracks")?)),
            Arc::new(MoveCommand::new(descriptor("move")?)),
            Arc::new(RemoveCommand::new(descriptor("remove")?)),
            Arc::new(ResetCommand::new(descriptor("reset")?)),
            Arc::new(ShuffleCommand::new(descriptor("shuffle")?)),
            Arc::new(SkipCommand::new(
                descriptor("skip")?,
                config.general.skip_ratio,
            )),
            Arc::new(ForceSkipCommand::new(descriptor("forceskip")?)),
            Arc::new(VolumeCommand::new(descriptor("volume")?, &config.volume)),
        ];

        let help = descriptor("help")?;
        let mut listing: Vec<CommandDescriptor> = commands
            .iter()
            .map(|command| command.descriptor().clone())
            .collect();
        listing.push(help.clone());
        commands.push(Arc::new(HelpCommand::new(
            help,
            config.general.command_prefix.clone(),
            listing,
        )));

        Self::new(commands)
    }

    /// Looks up a command token, ignoring case and surrounding whitespace.
    pub fn resolve(&self, token: &str) -> Option<&Arc<dyn Command>> {
        let normalized = token.trim().to_lowercase();
        let command = self
            .aliases
            .get(&normalized)
            .and_then(|&index| self.commands.get(index));

        if command.is_none() {
            debug!("❔ No command registered for `{}`", normalized);
        }
        command
    }

    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }
}
