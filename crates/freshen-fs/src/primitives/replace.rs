use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::thread;

use crate::primitives::stage::stage;
use crate::{Error, ReplaceOptions, Result};

/// How a staged file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMethod {
    /// A single rename replaced the destination atomically.
    Rename,
    /// The destination was removed and the staged file renamed after it.
    RemoveThenRename { attempts: u32 },
}

/// Stage `content` beside `destination` and swap it in.
pub fn replace_file(
    destination: impl AsRef<Path>,
    content: &[u8],
    options: ReplaceOptions,
) -> Result<CommitMethod> {
    stage(destination, content, options)?.commit()
}

pub(crate) fn swap_into_place(src: &Path, dest: &Path, options: &ReplaceOptions) -> Result<CommitMethod> {
    let first = match fs::rename(src, dest) {
        Ok(()) => return Ok(CommitMethod::Rename),
        Err(e) => e,
    };

    // Nothing left to swap in; the destination stays untouched.
    if !src.exists() {
        return Err(Error::Replace {
            path:   dest.to_path_buf(),
            source: first,
        });
    }

    remove_then_rename(src, dest, options)
}

fn remove_then_rename(src: &Path, dest: &Path, options: &ReplaceOptions) -> Result<CommitMethod> {
    let mut attempts = 0;
    loop {
        attempts += 1;

        let result = match fs::remove_file(dest) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => fs::rename(src, dest),
        };

        match result {
            Ok(()) => return Ok(CommitMethod::RemoveThenRename { attempts }),
            Err(e) if attempts >= options.get_retry_count() => {
                return Err(Error::Replace {
                    path:   dest.to_path_buf(),
                    source: e,
                });
            }
            Err(_) => thread::sleep(options.get_retry_delay() * attempts),
        }
    }
}
