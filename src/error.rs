use thiserror::Error;

/// Errors produced by the sweep and its storage adapters.
///
/// Per-document problems (`InvalidDate`, `MissingDate`, `MalformedDocument`,
/// `NotFound`) are
/// skippable: the sweep logs them and moves on. `Storage` and `Internal` are
/// only fatal when they occur outside the per-document loop (e.g. opening the
/// database).
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("invalid event date: {0:?}")]
    InvalidDate(String),
    #[error("event date is missing")]
    MissingDate,
    #[error("malformed {collection} document {id}: {source}")]
    MalformedDocument {
        collection: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: &'static str, id: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, SweepError>;
