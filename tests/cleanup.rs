use stat_overlay::cleanup::{sweep, CleanupTask, ItemOutcome};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn sweep_removes_files_and_directories() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.tmp"), b"12345").unwrap();
    std::fs::write(dir.path().join("b.tmp"), b"1234567890").unwrap();
    let sub = dir.path().join("nested");
    std::fs::create_dir(&sub).unwrap();
    std::fs::write(sub.join("c.tmp"), b"xyz").unwrap();

    let report = sweep(&[dir.path().to_path_buf()]);

    assert_eq!(report.removed, 3, "two files plus one directory");
    assert_eq!(report.skipped, 0);
    assert_eq!(report.items.len(), 3);
    assert!(report.bytes_freed >= 15);
    assert!(dir.path().exists(), "the target directory itself survives");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    for (_, outcome) in &report.items {
        assert!(matches!(outcome, ItemOutcome::Removed { .. }));
    }
}

#[test]
fn sweep_ignores_missing_directories() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");
    let report = sweep(&[missing]);
    assert_eq!(report.removed, 0);
    assert_eq!(report.skipped, 0);
    assert!(report.items.is_empty());
}

#[test]
fn sweep_summary_reports_counts() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("x.tmp"), b"abc").unwrap();
    let report = sweep(&[dir.path().to_path_buf()]);
    assert!(report.summary().starts_with("Deleted 1 items"));
}

#[cfg(unix)]
#[test]
fn sweep_records_skipped_entries_with_a_reason() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("loose.tmp"), b"abc").unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::write(locked.join("held.tmp"), b"pinned").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users can unlink from a read-only directory; nothing to
    // observe in that case.
    if std::fs::remove_file(locked.join("held.tmp")).is_ok() {
        return;
    }

    let report = sweep(&[dir.path().to_path_buf()]);

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(report.removed, 1, "the loose file still goes");
    assert_eq!(report.skipped, 1);
    let (path, outcome) = report
        .items
        .iter()
        .find(|(path, _)| path == &locked)
        .expect("locked directory appears in the per-item list");
    assert_eq!(path, &locked);
    match outcome {
        ItemOutcome::Skipped { reason } => assert!(!reason.is_empty()),
        other => panic!("expected a skip, got {other:?}"),
    }
    assert!(locked.join("held.tmp").exists());
}

#[test]
fn task_reports_back_over_the_channel() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.tmp"), b"123").unwrap();

    let task = CleanupTask::new();
    assert!(task.start(vec![dir.path().to_path_buf()]));

    let deadline = Instant::now() + Duration::from_secs(5);
    let report = loop {
        if let Some(report) = task.poll() {
            break report;
        }
        assert!(Instant::now() < deadline, "cleanup worker never reported");
        std::thread::sleep(Duration::from_millis(10));
    };
    assert_eq!(report.removed, 1);
    assert!(!task.is_running());
}

#[test]
fn second_request_while_running_is_rejected() {
    let dir = tempdir().unwrap();
    for i in 0..200 {
        std::fs::write(dir.path().join(format!("f{i}.tmp")), b"data").unwrap();
    }

    let task = CleanupTask::new();
    assert!(task.start(vec![dir.path().to_path_buf()]));
    // Only assert rejection if the worker is still observably in flight;
    // a fast sweep may already have finished.
    if task.is_running() {
        assert!(!task.start(vec![dir.path().to_path_buf()]));
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    while task.is_running() {
        assert!(Instant::now() < deadline);
        std::thread::sleep(Duration::from_millis(10));
    }
    // Once idle, a new sweep is accepted again.
    assert!(task.start(Vec::new()));
}
