use parking_lot::RwLock;
use rand::{seq::SliceRandom, Rng};
use std::{collections::VecDeque, time::Duration};
use tokio::sync::watch;
use tracing::{debug, info};

use super::track::{AudioTrack, EntryId, QueueEntry};
use crate::error::QueueError;

/// Smallest queue that [`AudioQueue::shuffle`] accepts.
pub const MIN_SHUFFLE_LEN: usize = 3;

#[derive(Debug, Default)]
struct QueueInner {
    entries: VecDeque<QueueEntry>,
    current: Option<EntryId>,
    next_id: u64,
}

impl QueueInner {
    fn next_entry(&mut self, track: AudioTrack) -> QueueEntry {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        QueueEntry::new(id, track)
    }

    fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        if index >= self.entries.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

/// Shared playback queue for one voice session.
///
/// The queue is touched by two independent paths: the command dispatcher and
/// the playback-advance task. Every structural change happens under the write
/// side of a single lock, reads take the read side. The lock is never held
/// across an `.await`.
///
/// The playing entry is tracked by its [`EntryId`], not by its position, so
/// reorders such as [`shuffle`](Self::shuffle) never lose it.
///
/// Every change of the playing entry is published to the receivers handed
/// out by [`subscribe`](Self::subscribe) while the write lock is still held,
/// so the audio player sees changes in the order they happened.
#[derive(Debug)]
pub struct AudioQueue {
    inner: RwLock<QueueInner>,
    now_playing: watch::Sender<Option<QueueEntry>>,
}

impl Default for AudioQueue {
    fn default() -> Self {
        let (now_playing, _) = watch::channel(None);
        Self {
            inner: RwLock::default(),
            now_playing,
        }
    }
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the playing entry. `None` means the player should stop.
    ///
    /// Do not hold a borrow of the receiver while calling into the queue.
    pub fn subscribe(&self) -> watch::Receiver<Option<QueueEntry>> {
        self.now_playing.subscribe()
    }

    /// Appends tracks to the end of the queue and returns the new length.
    pub fn add_tracks<I>(&self, tracks: I) -> usize
    where
        I: IntoIterator<Item = AudioTrack>,
    {
        let mut queue = self.inner.write();
        let mut added = 0;

        for track in tracks {
            let entry = queue.next_entry(track);
            debug!("➕ Queued {} as {}", entry.track.title(), entry.id);
            queue.entries.push_back(entry);
            added += 1;
        }

        info!("➕ Added {} tracks to the queue", added);
        queue.entries.len()
    }

    /// Inserts tracks right after the playing entry, or at the head when
    /// nothing is playing. Returns the new length.
    pub fn insert_next<I>(&self, tracks: I) -> usize
    where
        I: IntoIterator<Item = AudioTrack>,
    {
        let mut queue = self.inner.write();
        let start = queue
            .current
            .and_then(|id| queue.position_of(id))
            .map_or(0, |position| position + 1);

        let mut inserted = 0;
        for track in tracks {
            let entry = queue.next_entry(track);
            queue.entries.insert(start + inserted, entry);
            inserted += 1;
        }

        info!("⏫ Inserted {} tracks at position {}", inserted, start);
        queue.entries.len()
    }

    /// Removes the entry at `index`.
    ///
    /// Removing the playing entry clears the playing marker.
    pub fn remove_track(&self, index: usize) -> Result<QueueEntry, QueueError> {
        let mut queue = self.inner.write();
        queue.check_index(index)?;

        let entry = queue
            .entries
            .remove(index)
            .ok_or(QueueError::IndexOutOfRange {
                index,
                len: queue.entries.len(),
            })?;

        if queue.current == Some(entry.id) {
            queue.current = None;
            self.now_playing.send_replace(None);
        }

        debug!("❌ Removed {} from position {}", entry.track.title(), index);
        Ok(entry)
    }

    /// Moves the entry at `from` so that it ends up at `to`.
    pub fn move_track(&self, from: usize, to: usize) -> Result<(), QueueError> {
        let mut queue = self.inner.write();
        queue.check_index(from)?;
        queue.check_index(to)?;

        if from != to {
            if let Some(entry) = queue.entries.remove(from) {
                queue.entries.insert(to, entry);
            }
            debug!("📍 Moved entry from position {} to {}", from, to);
        }

        Ok(())
    }

    /// Randomizes the order of every entry.
    pub fn shuffle(&self) -> Result<(), QueueError> {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Same as [`shuffle`](Self::shuffle) with a caller-supplied RNG.
    ///
    /// Queues with fewer than [`MIN_SHUFFLE_LEN`] entries are rejected and
    /// left untouched.
    pub fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(), QueueError> {
        let mut queue = self.inner.write();

        match queue.entries.len() {
            0 => Err(QueueError::EmptyQueue),
            len if len < MIN_SHUFFLE_LEN => Err(QueueError::InsufficientTracks { len }),
            len => {
                queue.entries.make_contiguous().shuffle(rng);
                info!("🔀 Shuffled {} tracks", len);
                Ok(())
            }
        }
    }

    /// Playback advance: drops the finished entry and marks the head as
    /// playing. Returns the newly playing entry.
    pub fn advance(&self) -> Option<QueueEntry> {
        let mut queue = self.inner.write();
        self.advance_locked(&mut queue)
    }

    /// Marks the head as playing when nothing is. Returns the playing entry.
    pub fn start(&self) -> Option<QueueEntry> {
        let mut queue = self.inner.write();
        if let Some(id) = queue.current {
            return queue.entries.iter().find(|entry| entry.id == id).cloned();
        }
        self.advance_locked(&mut queue)
    }

    /// Drops the playing entry and promotes the next one in a single step.
    ///
    /// Returns the skipped entry, or `None` when nothing was playing.
    pub fn skip_current(&self) -> Option<QueueEntry> {
        let mut queue = self.inner.write();
        let id = queue.current?;
        let skipped = queue.entries.iter().find(|entry| entry.id == id).cloned();
        self.advance_locked(&mut queue);
        skipped
    }

    /// Advances only if `finished` is still the playing entry.
    ///
    /// Returns `false` when the playback task already moved past it.
    pub fn advance_past(&self, finished: EntryId) -> bool {
        let mut queue = self.inner.write();
        if queue.current != Some(finished) {
            debug!("⏭️ {} is no longer playing, nothing to skip", finished);
            return false;
        }

        self.advance_locked(&mut queue);
        true
    }

    fn advance_locked(&self, queue: &mut QueueInner) -> Option<QueueEntry> {
        if let Some(finished) = queue.current.take() {
            if let Some(position) = queue.position_of(finished) {
                queue.entries.remove(position);
            }
        }

        let next = queue.entries.front().cloned();
        queue.current = next.as_ref().map(|entry| entry.id);

        match &next {
            Some(entry) => info!("➡️ Now playing: {}", entry.track.title()),
            None => info!("📭 Queue is empty, nothing left to play"),
        }
        self.now_playing.send_replace(next.clone());
        next
    }

    /// Drops every entry and the playing marker. Returns how many were dropped.
    pub fn reset(&self) -> usize {
        let mut queue = self.inner.write();
        let dropped = queue.entries.len();
        queue.entries.clear();
        if queue.current.take().is_some() {
            self.now_playing.send_replace(None);
        }
        info!("🗑️ Queue cleared: {} tracks removed", dropped);
        dropped
    }

    pub fn current(&self) -> Option<QueueEntry> {
        let queue = self.inner.read();
        let id = queue.current?;
        queue.entries.iter().find(|entry| entry.id == id).cloned()
    }

    /// The entry [`advance`](Self::advance) would promote next.
    pub fn peek_next(&self) -> Option<QueueEntry> {
        let queue = self.inner.read();
        queue
            .entries
            .iter()
            .find(|entry| Some(entry.id) != queue.current)
            .cloned()
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.inner.read().position_of(id)
    }

    pub fn snapshot(&self) -> Vec<QueueEntry> {
        self.inner.read().entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.inner
            .read()
            .entries
            .iter()
            .map(|entry| entry.track.duration())
            .sum()
    }
}
