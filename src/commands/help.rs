use std::fmt::Write;

use super::{Command, CommandDescriptor, Execution};
use crate::{
    bot::{BotState, IncomingMessage},
    error::CommandResult,
};

/// Lists the commands the sender is allowed to use.
pub struct HelpCommand {
    descriptor: CommandDescriptor,
    prefix: String,
    listing: Vec<CommandDescriptor>,
}

impl HelpCommand {
    /// `listing` holds every registered command, this one included.
    pub fn new(
        descriptor: CommandDescriptor,
        prefix: impl Into<String>,
        listing: Vec<CommandDescriptor>,
    ) -> Self {
        Self {
            descriptor,
            prefix: prefix.into(),
            listing,
        }
    }
}

impl Command for HelpCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn execute(&self, state: &BotState, message: &IncomingMessage) -> CommandResult<Execution> {
        let is_admin = state.session.is_admin(&message.sender);

        let mut reply = String::from("📖 Commands:");
        for command in self.listing.iter().filter(|c| is_admin || !c.admin) {
            let Some(alias) = command.aliases.first() else {
                continue;
            };
            let _ = write!(reply, "\n{}{} - {}", self.prefix, alias, command.description);
            if command.admin {
                reply.push_str(" (admin)");
            }
        }

        Ok(Execution::public(state.clone(), reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{descriptor, message, state_with};
    use pretty_assertions::assert_eq;

    fn command() -> HelpCommand {
        HelpCommand::new(
            descriptor("help", false),
            "!",
            vec![
                descriptor("add", false),
                descriptor("shuffle", true),
                descriptor("help", false),
            ],
        )
    }

    #[test]
    fn test_help_hides_admin_commands_from_users() {
        let execution = command()
            .execute(&state_with(0), &message("bob", "!help"))
            .unwrap();

        assert_eq!(
            execution.message,
            "📖 Commands:\n!add - add description\n!help - help description"
        );
    }

    #[test]
    fn test_help_shows_admin_commands_to_admins() {
        let execution = command()
            .execute(&state_with(0), &message("admin", "!help"))
            .unwrap();

        assert!(execution
            .message
            .contains("!shuffle - shuffle description (admin)"));
    }
}
