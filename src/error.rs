use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize table")]
    Json(#[from] serde_json::Error),

    #[error("unknown format: {0}. Use text or json")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
