use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{BotState, IncomingMessage, Transport};
use crate::{
    commands::{Command, CommandRegistry, Execution},
    error::CommandError,
};

/// How a single message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command, or an unknown alias.
    Ignored,
    /// Admin-only command from a non-admin; the command never ran.
    Denied,
    /// The command ran and its reply went to the channel.
    Executed,
    /// The command returned an error; the sender was told privately.
    Failed,
    /// The command panicked; the sender got a generic private reply.
    Panicked,
}

/// Turns chat messages into command invocations for one voice session.
///
/// Messages are handled one at a time, in arrival order. The dispatcher owns
/// the session's [`BotState`] and swaps in the state returned by a command
/// only when that command succeeds.
pub struct Dispatcher<T> {
    registry: Arc<CommandRegistry>,
    state: BotState,
    transport: T,
    prefix: String,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(
        registry: Arc<CommandRegistry>,
        state: BotState,
        transport: T,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            state,
            transport,
            prefix: prefix.into(),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Replaces the channel roster with the users currently connected.
    pub fn sync_roster<I, S>(&mut self, users: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.session.roster = users.into_iter().map(Into::into).collect();
        debug!(
            "👥 {} users in {}",
            self.state.session.roster.len(),
            self.state.session.channel
        );
    }

    pub fn set_admins<I, S>(&mut self, admins: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.session.admins = admins.into_iter().map(Into::into).collect();
    }

    /// Processes messages until every sender is dropped, then hands back the
    /// final state.
    pub async fn run(mut self, mut messages: mpsc::Receiver<IncomingMessage>) -> BotState {
        info!("🚀 Dispatcher started for {}", self.state.session.channel);

        while let Some(message) = messages.recv().await {
            self.dispatch(message).await;
        }

        info!("👋 Dispatcher stopped for {}", self.state.session.channel);
        self.state
    }

    /// Handles one message from start to finish.
    pub async fn dispatch(&mut self, message: IncomingMessage) -> DispatchOutcome {
        let Some(command) = self.resolve(&message.text) else {
            return DispatchOutcome::Ignored;
        };

        info!(
            "📝 Command {} used by {} in {}",
            command.name(),
            message.sender,
            self.state.session.channel
        );

        if command.is_admin() && !self.state.session.is_admin(&message.sender) {
            warn!(
                "🚫 {} tried to use admin command {}",
                message.sender,
                command.name()
            );
            let denied = CommandError::PermissionDenied {
                command: command.name().to_string(),
            };
            self.reply_private(&message.sender, &format!("🚫 {denied}")).await;
            return DispatchOutcome::Denied;
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            command.execute(&self.state, &message)
        }));

        match result {
            Ok(Ok(Execution {
                state,
                message: reply,
            })) => {
                self.state = state;
                self.broadcast(&reply).await;
                DispatchOutcome::Executed
            }
            Ok(Err(err)) => {
                debug!("Command {} failed for {}: {}", command.name(), message.sender, err);
                self.reply_private(&message.sender, &format!("❌ {err}")).await;
                DispatchOutcome::Failed
            }
            Err(_) => {
                error!("💥 Command {} panicked", command.name());
                let internal = CommandError::Internal {
                    command: command.name().to_string(),
                };
                self.reply_private(&message.sender, &format!("❌ {internal}"))
                    .await;
                DispatchOutcome::Panicked
            }
        }
    }

    /// The command token follows the prefix directly, which keeps it the
    /// first word of the message for [`IncomingMessage::args`].
    fn resolve(&self, text: &str) -> Option<Arc<dyn Command>> {
        let body = text.trim_start().strip_prefix(self.prefix.as_str())?;
        if body.starts_with(char::is_whitespace) {
            return None;
        }
        let token = body.split_whitespace().next()?;
        self.registry.resolve(token).cloned()
    }

    async fn reply_private(&self, recipient: &str, text: &str) {
        if let Err(e) = self.transport.send_private(recipient, text).await {
            warn!("Could not send private reply to {}: {:?}", recipient, e);
        }
    }

    async fn broadcast(&self, text: &str) {
        let channel = &self.state.session.channel;
        if let Err(e) = self.transport.broadcast(channel, text).await {
            warn!("Could not broadcast to {}: {:?}", channel, e);
        }
    }
}
