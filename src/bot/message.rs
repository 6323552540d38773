use crate::audio::AudioTrack;

/// A chat message as handed over by the transport layer.
///
/// Any track lookups the message asked for have already been resolved
/// upstream; the results ride along in `tracks`.
#[derive(Debug, Clone, Default)]
pub struct IncomingMessage {
    pub sender: String,
    pub channel: String,
    pub text: String,
    pub tracks: Vec<AudioTrack>,
}

impl IncomingMessage {
    pub fn new(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            channel: channel.into(),
            text: text.into(),
            tracks: Vec::new(),
        }
    }

    pub fn with_tracks(mut self, tracks: Vec<AudioTrack>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Whitespace-separated words after the command token, which is the
    /// first word of the text (prefix included).
    pub fn args(&self) -> Vec<&str> {
        self.text.split_whitespace().skip(1).collect()
    }
}
