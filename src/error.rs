use thiserror::Error;

/// Errors raised by [`AudioQueue`](crate::audio::queue::AudioQueue) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("the queue is empty")]
    EmptyQueue,

    #[error("the queue needs at least 3 tracks to be shuffled, it has {len}")]
    InsufficientTracks { len: usize },

    #[error("position {index} is out of range, the queue has {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors returned by command execution and the dispatcher.
///
/// Every variant is delivered to the invoking user as a private reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("you do not have permission to use `{command}`")]
    PermissionDenied { command: String },

    #[error("no playable tracks were attached to the request")]
    NoTracks,

    #[error("nothing is playing right now")]
    NothingPlaying,

    #[error("you already voted to skip this track")]
    AlreadyVoted,

    #[error("volume must be between {lowest} and {highest}, got {requested}")]
    VolumeOutOfRange {
        requested: f32,
        lowest: f32,
        highest: f32,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("an internal error occurred while running `{command}`")]
    Internal { command: String },
}

impl CommandError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(String),

    #[error("alias `{alias}` is used by both `{first}` and `{second}`")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("no configuration found for command `{0}`")]
    MissingCommand(String),
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;
