use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Outcome of one entry visited by the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Removed { bytes: u64 },
    Skipped { reason: String },
}

/// Aggregate result of a temp-file sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: usize,
    pub skipped: usize,
    pub bytes_freed: u64,
    pub items: Vec<(PathBuf, ItemOutcome)>,
}

impl CleanupReport {
    fn record(&mut self, path: PathBuf, outcome: ItemOutcome) {
        match &outcome {
            ItemOutcome::Removed { bytes } => {
                self.removed += 1;
                self.bytes_freed += bytes;
            }
            ItemOutcome::Skipped { .. } => self.skipped += 1,
        }
        self.items.push((path, outcome));
    }

    pub fn summary(&self) -> String {
        format!(
            "Deleted {} items, freed {:.2} MB ({} skipped)",
            self.removed,
            self.bytes_freed as f64 / (1024.0 * 1024.0),
            self.skipped
        )
    }
}

/// Directories targeted by the sweep.
pub fn default_targets() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let mut dirs = vec![std::env::temp_dir()];
        if let Ok(root) = std::env::var("SystemRoot") {
            let root = PathBuf::from(root);
            dirs.push(root.join("Temp"));
            dirs.push(root.join("Prefetch"));
            dirs.push(root.join("SoftwareDistribution").join("Download"));
        }
        dirs
    }
    #[cfg(not(target_os = "windows"))]
    {
        vec![std::env::temp_dir()]
    }
}

/// Best-effort removal of every entry in `dirs`.
///
/// Per-item failures are recorded and never abort the sweep; missing
/// directories are ignored.
pub fn sweep(dirs: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();
    for dir in dirs {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("skipping sweep target {:?}: {e}", dir);
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let outcome = remove_entry(&path);
            report.record(path, outcome);
        }
    }
    tracing::info!("{}", report.summary());
    report
}

fn remove_entry(path: &Path) -> ItemOutcome {
    let bytes = entry_size(path);
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Ok(()) => ItemOutcome::Removed { bytes },
        Err(e) => ItemOutcome::Skipped {
            reason: e.to_string(),
        },
    }
}

fn entry_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Runs the sweep on a worker thread; the report comes back over a channel
/// polled by the UI thread. A second request while one is in flight is
/// rejected.
pub struct CleanupTask {
    running: Arc<AtomicBool>,
    tx: Sender<CleanupReport>,
    rx: Receiver<CleanupReport>,
}

impl CleanupTask {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            running: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a sweep of `dirs`. Returns false if one is already in flight.
    pub fn start(&self, dirs: Vec<PathBuf>) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("cleanup already running; request rejected");
            return false;
        }
        let running = self.running.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let report = sweep(&dirs);
            running.store(false, Ordering::SeqCst);
            let _ = tx.send(report);
        });
        true
    }

    /// Take the finished report, if the worker has produced one.
    pub fn poll(&self) -> Option<CleanupReport> {
        match self.rx.try_recv() {
            Ok(report) => Some(report),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Default for CleanupTask {
    fn default() -> Self {
        Self::new()
    }
}
