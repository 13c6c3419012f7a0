use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("unknown view mode `{0}` (expected `grid` or `list`)")]
    InvalidViewMode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
