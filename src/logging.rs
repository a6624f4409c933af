use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging. The default level is `info`; `debug` raises it and
/// lets `RUST_LOG` override. When a file path is given, output additionally
/// goes to that file through a non-blocking appender.
pub fn init(debug: bool, file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` so a stray RUST_LOG in the environment cannot make
        // the overlay verbose.
        EnvFilter::new(level)
    };

    match file {
        Some(path) => {
            let dir = path.parent().map(PathBuf::from).unwrap_or_default();
            let _ = std::fs::create_dir_all(&dir);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "stat_overlay.log".to_string());
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }
}
