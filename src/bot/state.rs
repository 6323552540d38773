use std::{collections::HashSet, sync::Arc};

use crate::{
    audio::{AudioQueue, EntryId},
    config::BotConfig,
};

/// Channel context for one voice session, as reported by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub channel: String,
    /// Users currently connected to the channel.
    pub roster: HashSet<String>,
    /// Users allowed to run admin-only commands.
    pub admins: HashSet<String>,
}

impl Session {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ..Self::default()
        }
    }

    pub fn with_admins<I, S>(mut self, admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admins = admins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_roster<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = users.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_admin(&self, user: &str) -> bool {
        self.admins.contains(user)
    }
}

/// Skip votes for the playing entry.
///
/// Votes belong to one entry; a vote for a different entry discards the
/// previous tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipVotes {
    entry: Option<EntryId>,
    voters: HashSet<String>,
}

impl SkipVotes {
    /// Records a vote. Returns `false` if `voter` already voted for `entry`.
    pub fn cast(&mut self, entry: EntryId, voter: &str) -> bool {
        if self.entry != Some(entry) {
            self.entry = Some(entry);
            self.voters.clear();
        }
        self.voters.insert(voter.to_string())
    }

    pub fn count_for(&self, entry: EntryId) -> usize {
        if self.entry == Some(entry) {
            self.voters.len()
        } else {
            0
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
        self.voters.clear();
    }
}

/// Everything a command can read or change for one voice session.
///
/// Cloning is cheap: the queue is shared, so the clone returned by a command
/// still refers to the same queue the playback task advances.
#[derive(Debug, Clone)]
pub struct BotState {
    pub session: Session,
    pub queue: Arc<AudioQueue>,
    pub volume: f32,
    pub skip_votes: SkipVotes,
}

impl BotState {
    pub fn new(session: Session, queue: Arc<AudioQueue>, volume: f32) -> Self {
        Self {
            session,
            queue,
            volume,
            skip_votes: SkipVotes::default(),
        }
    }

    /// Fresh state for a session that just joined a channel.
    pub fn from_config(session: Session, config: &BotConfig) -> Self {
        Self::new(session, Arc::new(AudioQueue::new()), config.volume.default)
    }
}
