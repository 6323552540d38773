//! # Bot Module
//!
//! Per-session state and the chat command dispatcher.
//!
//! ## Architecture
//!
//! - [`BotState`]: queue, channel roster, administrators, volume and skip
//!   votes for one voice session
//! - [`IncomingMessage`]: a chat message plus any tracks resolved for it
//! - [`Transport`]: outbound replies (private or channel-wide)
//! - [`Dispatcher`]: resolves aliases, checks permissions, runs commands and
//!   routes their replies
//!
//! ## Example
//!
//! ```rust,no_run
//! use open_dj::bot::{BotState, Dispatcher, Session, Transport};
//! use open_dj::commands::CommandRegistry;
//! use open_dj::config::BotConfig;
//! use std::sync::Arc;
//!
//! # async fn example(transport: impl Transport + 'static) -> anyhow::Result<()> {
//! let config = BotConfig::load()?;
//! let registry = Arc::new(CommandRegistry::from_config(&config)?);
//! let session = Session::new("lobby").with_admins(["alice"]);
//! let state = BotState::from_config(session, &config);
//!
//! let (tx, rx) = tokio::sync::mpsc::channel(64);
//! let dispatcher = Dispatcher::new(registry, state, transport, config.general.command_prefix.clone());
//! tokio::spawn(dispatcher.run(rx));
//! # drop(tx);
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod message;
pub mod state;
pub mod transport;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use message::IncomingMessage;
pub use state::{BotState, Session, SkipVotes};
pub use transport::Transport;
