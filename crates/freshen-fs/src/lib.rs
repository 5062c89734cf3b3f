//! Crash-safe replacement of a single cached file.
//!
//! Content is first staged in the destination's directory, then swapped
//! over the destination with one rename. Readers of the destination see
//! either the previous complete file or the new complete file.
//!
//! When the platform refuses to rename over an existing file, the swap
//! degrades to remove-then-rename with bounded retries. That fallback has
//! a short window in which the destination is absent, but it never exposes
//! a truncated file.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::{CommitMethod, Snapshot, StagedFile, read_snapshot, replace_file, stage};

use std::time::Duration;

#[cfg(unix)]
const DEFAULT_PERMISSIONS: u32 = 0o644;

#[derive(Clone, Copy, Debug)]
pub struct ReplaceOptions {
    sync:        bool,
    #[cfg(unix)]
    permissions: u32,
    prefix:      &'static str,
    suffix:      &'static str,
    retry_count: u32,
    retry_delay: Duration,
}

impl Default for ReplaceOptions {
    fn default() -> Self { Self::new() }
}

impl ReplaceOptions {
    pub fn new() -> Self {
        Self {
            sync:        true,
            #[cfg(unix)]
            permissions: DEFAULT_PERMISSIONS,
            prefix:      ".",
            suffix:      ".tmp",
            retry_count: 5,
            retry_delay: Duration::from_millis(100),
        }
    }

    /// Flush staged content to stable storage before it is swapped in.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    #[cfg(unix)]
    pub fn permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    #[cfg(not(unix))]
    pub fn permissions(self, _permissions: u32) -> Self { self }

    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Attempts made by the remove-then-rename fallback.
    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count.max(1);
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn get_sync(&self) -> bool { self.sync }

    pub fn prefix_str(&self) -> &'static str { self.prefix }

    pub fn suffix_str(&self) -> &'static str { self.suffix }

    pub fn get_retry_count(&self) -> u32 { self.retry_count }

    pub fn get_retry_delay(&self) -> Duration { self.retry_delay }

    #[cfg(unix)]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(self.permissions))
    }

    #[cfg(not(unix))]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReplaceOptions::default();
        assert!(options.get_sync());
        assert_eq!(options.prefix_str(), ".");
        assert_eq!(options.suffix_str(), ".tmp");
        assert_eq!(options.get_retry_count(), 5);
        assert_eq!(options.get_retry_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_retry_count_never_zero() {
        let options = ReplaceOptions::new().retry_count(0);
        assert_eq!(options.get_retry_count(), 1);
    }
}
