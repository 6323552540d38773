//! # Open DJ
//!
//! Shared playback queue and chat command handling for voice-channel music
//! bots.
//!
//! The crate covers what happens between a chat message arriving and a reply
//! going out: alias lookup, admin checks, queue mutations and reply routing.
//! Fetching, decoding and streaming audio live elsewhere; they hand in
//! already-resolved [`AudioTrack`](audio::AudioTrack)s, follow the playing
//! entry through [`AudioQueue::subscribe`](audio::AudioQueue::subscribe) and
//! report back through [`audio::playback`].
//!
//! - [`audio`]: tracks, the lock-guarded [`AudioQueue`](audio::AudioQueue)
//!   and the playback-advance task
//! - [`commands`]: the [`Command`](commands::Command) trait, every built-in
//!   command and the alias registry
//! - [`bot`]: per-session state and the [`Dispatcher`](bot::Dispatcher)
//! - [`config`]: layered configuration
//! - [`logging`]: tracing setup

pub mod audio;
pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{CommandError, ConfigError, QueueError};
