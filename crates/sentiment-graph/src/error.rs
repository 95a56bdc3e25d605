use thiserror::Error;

/// Errors raised while turning a topic and a batch of posts into a graph.
///
/// Every variant aborts the whole build; no partially built graph is ever
/// made visible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("topic must not be empty or blank")]
    InvalidTopic,

    #[error("classifier returned unknown sentiment label {label:?} for post {post_id}")]
    UnknownSentimentLabel { post_id: String, label: String },

    #[error("post record {post_id:?} is missing required field `{field}`")]
    MalformedPostRecord { post_id: String, field: &'static str },
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors from loading posts out of a dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read post dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON in post dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV in post dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    Record { line: usize, reason: String },

    #[error("unsupported dataset format: {0:?}")]
    UnsupportedFormat(String),
}

/// Errors from the on-disk post archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive snapshot is corrupt: {0}")]
    Codec(#[from] bincode::Error),
}

/// Errors from reading configuration out of the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("{0} expects a value")]
    MissingValue(&'static str),
}
