//! # Commands
//!
//! Chat commands and the registry that resolves aliases to them.
//!
//! Every command implements [`Command`]. Its aliases, description and admin
//! flag come from configuration and are frozen in a [`CommandDescriptor`]
//! when the [`CommandRegistry`] is built.
//!
//! ## Execution contract
//!
//! [`Command::execute`] either succeeds with an [`Execution`] (the updated
//! state plus a non-empty reply for the whole channel) or fails with a
//! [`CommandError`] that the dispatcher sends privately to the invoker.
//! Execution never blocks: anything slow happens before the message reaches
//! the dispatcher.

use crate::{
    bot::{BotState, IncomingMessage},
    config::CommandConfig,
    error::{CommandError, CommandResult},
};

pub mod add;
pub mod edit;
pub mod help;
pub mod listing;
pub mod registry;
pub mod shuffle;
pub mod skip;
pub mod volume;

pub use registry::CommandRegistry;

/// Configured identity of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Configuration key, used in logs and permission errors.
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub admin: bool,
}

impl CommandDescriptor {
    pub fn from_config(name: impl Into<String>, config: &CommandConfig) -> Self {
        Self {
            name: name.into(),
            aliases: config.aliases.clone(),
            description: config.description.clone(),
            admin: config.admin,
        }
    }
}

/// Successful outcome of [`Command::execute`].
#[derive(Debug, Clone)]
pub struct Execution {
    pub state: BotState,
    pub message: String,
}

impl Execution {
    /// A reply for the whole channel.
    pub fn public(state: BotState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}

pub trait Command: Send + Sync {
    fn descriptor(&self) -> &CommandDescriptor;

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution>;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    fn aliases(&self) -> &[String] {
        &self.descriptor().aliases
    }

    fn description(&self) -> &str {
        &self.descriptor().description
    }

    fn is_admin(&self) -> bool {
        self.descriptor().admin
    }
}

/// Parses a 1-based queue position typed in chat into an index.
pub(crate) fn parse_position(arg: Option<&str>) -> CommandResult<usize> {
    let arg = arg.ok_or_else(|| CommandError::invalid_argument("a track position is required"))?;

    match arg.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position - 1),
        _ => Err(CommandError::invalid_argument(format!(
            "`{arg}` is not a valid track position"
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(Some("1")), Ok(0));
        assert_eq!(parse_position(Some("12")), Ok(11));
        assert!(parse_position(Some("0")).is_err());
        assert!(parse_position(Some("two")).is_err());
        assert!(parse_position(None).is_err());
    }
}
