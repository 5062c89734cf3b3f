use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::primitives::replace::{CommitMethod, swap_into_place};
use crate::{Error, ReplaceOptions, Result};

/// Content written next to its destination, waiting to be swapped in.
///
/// Dropping an uncommitted `StagedFile` removes the staged copy, so a
/// failed refresh leaves nothing behind in the cache directory.
#[derive(Debug)]
pub struct StagedFile {
    path:           PathBuf,
    destination:    PathBuf,
    options:        ReplaceOptions,
    fallback_cause: Option<Error>,
    committed:      bool,
}

impl StagedFile {
    pub fn path(&self) -> &Path { &self.path }

    /// Why the unique temp file could not be used, if the staged copy was
    /// written under the fixed adjacent name instead.
    pub fn fallback_cause(&self) -> Option<&Error> { self.fallback_cause.as_ref() }

    pub fn commit(mut self) -> Result<CommitMethod> {
        let method = swap_into_place(&self.path, &self.destination, &self.options)?;
        self.committed = true;
        Ok(method)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write `content` to a temporary file in the same directory as
/// `destination`.
///
/// A uniquely named file is preferred. If it cannot be created, the
/// content goes to `<prefix><file name><suffix>` beside the destination.
pub fn stage(
    destination: impl AsRef<Path>,
    content: &[u8],
    options: ReplaceOptions,
) -> Result<StagedFile> {
    stage_with(destination.as_ref(), content, options, stage_unique)
}

/// [`stage`] with the unique-name step supplied by the caller.
fn stage_with(
    destination: &Path,
    content: &[u8],
    options: ReplaceOptions,
    unique: impl FnOnce(&Path, &OsStr, &[u8], &ReplaceOptions) -> Result<PathBuf>,
) -> Result<StagedFile> {
    let file_name = destination.file_name().ok_or_else(|| Error::NoFileName {
        path: destination.to_path_buf(),
    })?;
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let (path, fallback_cause) = match unique(parent, file_name, content, &options) {
        Ok(path) => (path, None),
        Err(cause) => {
            let path = parent.join(adjacent_name(file_name, &options));
            stage_adjacent(&path, content, &options)?;
            (path, Some(cause))
        }
    };

    Ok(StagedFile {
        path,
        destination: destination.to_path_buf(),
        options,
        fallback_cause,
        committed: false,
    })
}

fn adjacent_name(file_name: &OsStr, options: &ReplaceOptions) -> OsString {
    let mut name = OsString::from(options.prefix_str());
    name.push(file_name);
    name.push(options.suffix_str());
    name
}

fn stage_unique(
    parent: &Path,
    file_name: &OsStr,
    content: &[u8],
    options: &ReplaceOptions,
) -> Result<PathBuf> {
    let mut prefix = OsString::from(options.prefix_str());
    prefix.push(file_name);
    prefix.push(".");

    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(options.suffix_str())
        .tempfile_in(parent)
        .map_err(|e| Error::Stage {
            path:   parent.to_path_buf(),
            source: e,
        })?;

    let tmp_path = tmp.path().to_path_buf();
    fill(tmp.as_file_mut(), &tmp_path, content, options)?;

    let (_file, path) = tmp.keep().map_err(|e| Error::Stage {
        path:   tmp_path,
        source: e.error,
    })?;
    Ok(path)
}

fn stage_adjacent(path: &Path, content: &[u8], options: &ReplaceOptions) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::Stage {
            path:   path.to_path_buf(),
            source: e,
        })?;

    fill(&mut file, path, content, options).inspect_err(|_| {
        let _ = fs::remove_file(path);
    })
}

fn fill(file: &mut File, path: &Path, content: &[u8], options: &ReplaceOptions) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    file.write_all(content).map_err(write_err)?;

    if let Some(perms) = options.into_permissions() {
        file.set_permissions(perms).map_err(write_err)?;
    }

    if options.get_sync() {
        file.sync_all().map_err(write_err)?;
    }

    Ok(())
}
