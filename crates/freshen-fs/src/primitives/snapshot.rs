use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::SystemTime;

use crate::{Error, Result};

/// Full content of a file together with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub content:  Vec<u8>,
    pub modified: Option<SystemTime>,
}

/// Read `path` in one pass from a single open handle.
///
/// Returns `Ok(None)` when the file does not exist. Because the content and
/// metadata come from the same handle, a concurrent replacement of `path`
/// yields either the old file or the new one, never a mix.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Option<Snapshot>> {
    let path = path.as_ref();
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_err(e)),
    };

    let metadata = file.metadata().map_err(read_err)?;
    let mut content = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut content).map_err(read_err)?;

    Ok(Some(Snapshot {
        content,
        modified: metadata.modified().ok(),
    }))
}
