use std::path::PathBuf;

use thiserror::Error;

/// Trace diff errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read trace {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
