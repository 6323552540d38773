use chrono::{DateTime, Utc};
use std::{fmt, time::Duration};

/// A resolved, playable track.
///
/// Tracks are built by an upstream resolver (search, URL lookup) before they
/// ever reach the queue and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioTrack {
    title: String,
    duration: Duration,
    submitter: String,
    source: String,
}

impl AudioTrack {
    pub fn new(
        title: impl Into<String>,
        duration: Duration,
        submitter: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            duration,
            submitter: submitter.into(),
            source: source.into(),
        }
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn duration(&self) -> Duration {
        self.duration
    }
    pub fn submitter(&self) -> &str {
        &self.submitter
    }
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for AudioTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" ({}) added by {}",
            self.title,
            humantime::format_duration(self.duration),
            self.submitter
        )
    }
}

/// Identity of a queue entry, stable across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A track as it sits in the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: EntryId,
    pub track: AudioTrack,
    pub added_at: DateTime<Utc>,
}

impl QueueEntry {
    pub(crate) fn new(id: EntryId, track: AudioTrack) -> Self {
        Self {
            id,
            track,
            added_at: Utc::now(),
        }
    }
}
