//! Error type shared by every mapforge operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or writing map sections.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// A caller-supplied argument (usually a path) was empty or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The append target does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// A fixed identifier key was requested twice.
    #[error("fixed id key {0} is already in use")]
    DuplicateFixedKey(i32),
    /// A rendered `key=value` line reached the engine's line ceiling.
    #[error("record [{section}] {key} renders to {len} characters (limit is {limit})")]
    RecordTooLong {
        section: String,
        key: String,
        len: usize,
        limit: usize,
    },
    /// A trigger tried to force itself.
    #[error("trigger {0} cannot force itself")]
    SelfTriggerReferenceDenied(String),
    /// A team was emitted without its task force or script.
    #[error("team {team} has no {missing} assigned")]
    MissingReference { team: String, missing: &'static str },
    #[error("no trigger named '{0}'")]
    UnknownTrigger(String),
    #[error("{count} triggers are named '{name}'")]
    AmbiguousTrigger { name: String, count: usize },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
