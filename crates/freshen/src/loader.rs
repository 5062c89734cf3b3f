use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

use freshen_fs::read_snapshot;
use tracing::{debug, info, warn};

use crate::error::BoxError;

/// Feed a previously mirrored copy to `on_update` before any network use.
///
/// Returns the file's modification time when the copy exists and the
/// callback accepts it; that time becomes the baseline for a modification
/// time scheme. A missing file, an unreadable one, or a rejected one all
/// yield `None`, and none of them is fatal.
pub fn load_initial(
    path: &Path,
    on_update: &(dyn Fn(&mut dyn Read) -> Result<(), BoxError> + Send + Sync + '_),
) -> Option<SystemTime> {
    let snapshot = match read_snapshot(path) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            debug!(path = %path.display(), "no mirrored copy yet");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read mirrored copy");
            return None;
        }
    };

    let mut reader = snapshot.content.as_slice();
    match on_update(&mut reader) {
        Ok(()) => {
            info!(path = %path.display(), bytes = snapshot.content.len(), "loaded mirrored copy");
            snapshot.modified
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "mirrored copy rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_absent_file() {
        let dir = tempfile::tempdir().unwrap();
        let calls = AtomicUsize::new(0);

        let baseline = load_initial(&dir.path().join("feed.xml"), &|_: &mut dyn Read| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(baseline, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_existing_file_is_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, b"cached").unwrap();
        let expected = fs::metadata(&path).unwrap().modified().unwrap();

        let baseline = load_initial(&path, &|reader: &mut dyn Read| {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            assert_eq!(text, "cached");
            Ok(())
        });

        assert_eq!(baseline, Some(expected));
    }

    #[test]
    fn test_rejected_file_gives_no_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, b"corrupt").unwrap();

        let baseline = load_initial(&path, &|_: &mut dyn Read| Err("corrupt".into()));

        assert_eq!(baseline, None);
        assert_eq!(fs::read(&path).unwrap(), b"corrupt");
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let dir = tempfile::tempdir().unwrap();

        let baseline = load_initial(dir.path(), &|_: &mut dyn Read| Ok(()));

        assert_eq!(baseline, None);
    }
}
