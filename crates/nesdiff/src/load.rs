use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::{Error, Result};

/// Read a whole trace file, one entry per line with terminators stripped.
///
/// # Errors
///
/// Returns [`Error::Io`] naming `path` if the file cannot be opened or read.
pub fn load_trace(path: &Path) -> Result<Vec<String>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err)?;

    info!(path = %path.display(), lines = lines.len(), "loaded trace");
    Ok(lines)
}
