//! Validate fetched content, then swap it into the cache path.

use std::io::Read;
use std::path::Path;

use freshen_fs::{CommitMethod, ReplaceOptions};
use tracing::{debug, warn};

use crate::error::{BoxError, Error, Result};

/// Signature of the update callback.
///
/// The callback reads the complete content through the given reader. It
/// runs on a blocking thread, so it may do synchronous work freely.
pub type UpdateFn = dyn Fn(&mut dyn Read) -> std::result::Result<(), BoxError> + Send + Sync;

/// Hand `body` to `on_update` and, only if it accepts, replace `path` with it.
///
/// A rejected body never touches the file system. Once accepted, readers of
/// `path` observe either the previous content or the new one, never a mix.
pub fn replace_validated(
    path: &Path,
    body: &[u8],
    on_update: &(dyn Fn(&mut dyn Read) -> std::result::Result<(), BoxError> + Send + Sync + '_),
    options: ReplaceOptions,
) -> Result<CommitMethod> {
    let mut reader = body;
    on_update(&mut reader).map_err(Error::Callback)?;

    let staged = freshen_fs::stage(path, body, options)?;
    if let Some(cause) = staged.fallback_cause() {
        debug!(path = %path.display(), error = %cause, "staged under adjacent name");
    }

    let method = staged.commit()?;
    if let CommitMethod::RemoveThenRename { attempts } = method {
        warn!(path = %path.display(), attempts, "atomic rename failed, replaced by remove-then-rename");
    }
    Ok(method)
}
