use std::path::PathBuf;

/// Explicit store configuration, injected at adapter construction.
///
/// The store client is never built from ambient process state; everything it
/// needs arrives through this struct.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Filesystem path of the persistent database.
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}
