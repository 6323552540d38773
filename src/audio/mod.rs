//! # Audio Module
//!
//! Track model and the shared playback queue.
//!
//! ## Architecture
//!
//! ### [`track`] - Track Model
//! - Immutable [`AudioTrack`] descriptors handed in by upstream resolvers
//! - [`QueueEntry`] wrappers carrying a stable [`EntryId`]
//!
//! ### [`queue`] - Queue Management
//! - Lock-guarded operations safe to call from the dispatcher and the
//!   playback task at the same time
//! - Shuffle, reorder, removal and playback advance
//!
//! ### [`playback`] - Playback Advance
//! - Background task that starts and advances the queue on
//!   [`PlayerEvent`](playback::PlayerEvent)s from the audio player
//! - The player follows [`AudioQueue::subscribe`], which also reflects skips
//!   made by commands
//!
//! ## Example Usage
//!
//! ```rust
//! use open_dj::audio::{AudioQueue, AudioTrack};
//! use std::time::Duration;
//!
//! let queue = AudioQueue::new();
//! queue.add_tracks((1..=3).map(|n| {
//!     AudioTrack::new(format!("Song {n}"), Duration::from_secs(200), "alice", "https://example.com")
//! }));
//!
//! queue.advance();
//! queue.shuffle().unwrap();
//! assert_eq!(queue.len(), 3);
//! ```

pub mod playback;
pub mod queue;
pub mod track;

pub use queue::AudioQueue;
pub use track::{AudioTrack, EntryId, QueueEntry};
