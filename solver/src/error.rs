//! Crate error type.

/// Errors raised when building pools or criteria, or running an experiment.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("trial count must be at least 1")]
    ZeroTrials,

    #[error("invalid count for label '{label}': {count} (counts must be non-negative)")]
    InvalidCount { label: String, count: i64 },

    #[error("labels must be non-empty")]
    EmptyLabel,

    #[error("label '{0}' given more than once")]
    DuplicateLabel(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("thread pool setup failed: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, Error>;
