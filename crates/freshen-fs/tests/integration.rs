use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use freshen_fs::{CommitMethod, ReplaceOptions, read_snapshot, replace_file, stage};
use tempfile::tempdir;

const SIZE: usize = 256 * 1024;

#[test]
fn test_replace_then_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.bin");

    replace_file(&path, b"first", ReplaceOptions::new()).unwrap();
    replace_file(&path, b"second", ReplaceOptions::new()).unwrap();

    let snapshot = read_snapshot(&path).unwrap().unwrap();
    assert_eq!(snapshot.content, b"second");
}

#[test]
fn test_dropped_stage_keeps_previous_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.bin");
    replace_file(&path, b"committed", ReplaceOptions::new()).unwrap();

    let staged = stage(&path, b"abandoned", ReplaceOptions::new()).unwrap();
    drop(staged);

    assert_eq!(std::fs::read(&path).unwrap(), b"committed");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_commit_reports_rename() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.bin");
    std::fs::write(&path, b"old").unwrap();

    let method = stage(&path, b"new", ReplaceOptions::new().sync(false))
        .unwrap()
        .commit()
        .unwrap();

    assert_eq!(method, CommitMethod::Rename);
}

#[test]
fn test_readers_never_see_torn_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mirror.bin");
    replace_file(&path, &vec![b'a'; SIZE], ReplaceOptions::new()).unwrap();

    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let path = path.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut reads = 0usize;
            while !done.load(Ordering::Acquire) {
                let snapshot = read_snapshot(&path)
                    .unwrap()
                    .expect("destination vanished during replace");
                assert_eq!(snapshot.content.len(), SIZE);
                let first = snapshot.content[0];
                assert!(snapshot.content.iter().all(|b| *b == first));
                reads += 1;
            }
            reads
        })
    };

    for round in 0..50 {
        let fill = if round % 2 == 0 { b'b' } else { b'a' };
        replace_file(&path, &vec![fill; SIZE], ReplaceOptions::new().sync(false)).unwrap();
    }

    done.store(true, Ordering::Release);
    assert!(reader.join().unwrap() > 0);
}
