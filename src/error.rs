use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading content from the store.
///
/// Loaders never propagate these to the page; they are logged and the
/// affected section falls back to its default content.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("fetching `{table}` timed out after {}ms", .after.as_millis())]
    Timeout {
        table: &'static str,
        after: Duration,
    },

    #[error("`{0}` is unavailable")]
    Unavailable(&'static str),
}

/// Errors raised by carousel sessions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("unknown carousel session `{0}`")]
    UnknownSession(String),

    #[error("slide {index} is out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },

    #[error("carousel session `{0}` is closed")]
    SessionClosed(String),

    #[error("carousel session `{0}` is busy")]
    SessionBusy(String),
}
