use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

use super::{queue::AudioQueue, track::EntryId};

/// What the audio player reports back to the queue.
///
/// The player learns what to play from [`AudioQueue::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Nothing is playing; start the head of the queue, if any.
    Idle,
    /// The entry ran to its end on its own.
    Finished(EntryId),
}

/// Spawns the playback-advance task for one session.
///
/// A [`PlayerEvent::Finished`] only advances the queue while that entry is
/// still the playing one, so a finish that arrives after a skip is dropped.
/// The task ends when every sender is dropped.
pub fn spawn_advance_loop(
    queue: Arc<AudioQueue>,
    mut events: mpsc::Receiver<PlayerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                PlayerEvent::Idle => {
                    debug!("🎵 Player idle, starting queue");
                    queue.start();
                }
                PlayerEvent::Finished(entry) => {
                    debug!("🎵 Track {} finished, advancing queue", entry);
                    queue.advance_past(entry);
                }
            }
        }

        info!("🔌 Playback advance loop stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::track::AudioTrack;
    use std::time::Duration;

    fn queue_of(titles: &[&str]) -> Arc<AudioQueue> {
        let queue = Arc::new(AudioQueue::new());
        queue.add_tracks(titles.iter().map(|title| {
            AudioTrack::new(*title, Duration::from_secs(60), "bob", "file:///tmp/a.ogg")
        }));
        queue
    }

    #[tokio::test]
    async fn test_advance_loop_follows_finished_tracks() {
        let queue = queue_of(&["a", "b", "c"]);
        let mut now_playing = queue.subscribe();
        let (events_tx, events_rx) = mpsc::channel(8);
        let handle = spawn_advance_loop(Arc::clone(&queue), events_rx);

        events_tx.send(PlayerEvent::Idle).await.unwrap();
        now_playing.changed().await.unwrap();
        let first = now_playing.borrow_and_update().clone().unwrap();
        assert_eq!(first.track.title(), "a");

        events_tx.send(PlayerEvent::Finished(first.id)).await.unwrap();
        drop(events_tx);
        handle.await.unwrap();

        let playing = now_playing.borrow().clone().unwrap();
        assert_eq!(playing.track.title(), "b");
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().map(|entry| entry.id), Some(playing.id));
    }

    #[tokio::test]
    async fn test_late_finish_after_skip_is_dropped() {
        let queue = queue_of(&["a", "b", "c"]);
        let first = queue.start().unwrap();
        queue.skip_current();
        let (events_tx, events_rx) = mpsc::channel(8);
        let handle = spawn_advance_loop(Arc::clone(&queue), events_rx);

        events_tx.send(PlayerEvent::Finished(first.id)).await.unwrap();
        drop(events_tx);
        handle.await.unwrap();

        assert_eq!(queue.current().unwrap().track.title(), "b");
        assert_eq!(queue.len(), 2);
    }

    #[tokio::test]
    async fn test_advance_loop_publishes_none_when_drained() {
        let queue = queue_of(&["only"]);
        let now_playing = queue.subscribe();
        let (events_tx, events_rx) = mpsc::channel(8);
        let handle = spawn_advance_loop(Arc::clone(&queue), events_rx);

        let only = queue.start().unwrap();
        events_tx.send(PlayerEvent::Finished(only.id)).await.unwrap();
        events_tx.send(PlayerEvent::Idle).await.unwrap();
        drop(events_tx);
        handle.await.unwrap();

        assert!(now_playing.borrow().is_none());
        assert!(queue.is_empty());
    }
}
