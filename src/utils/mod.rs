use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::{Mutex, Once},
};

use tracing_subscriber::{
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TRACING_INIT: Once = Once::new();

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Append-only log file. `None` disables the file sink.
    pub log_file: Option<PathBuf>,
    /// Mirror events to stderr.
    pub console: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            level: "info".into(),
            log_file: None,
            console: false,
        }
    }
}

/// Initializes the global tracing subscriber.
///
/// File lines read `<timestamp> <LEVEL> <message>`. A log file that cannot be
/// opened is reported on stderr and skipped.
pub fn init_tracing(options: &TracingOptions) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&options.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let console = options
            .console
            .then(|| fmt::layer().with_target(false).with_writer(io::stderr));

        let file = options.log_file.as_deref().and_then(|path| match open_log_file(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(LOG_TIMESTAMP_FORMAT.to_string()))
                    .with_writer(Mutex::new(file)),
            ),
            Err(err) => {
                eprintln!("cannot open log file {}: {err}", path.display());
                None
            }
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file)
            .try_init();
    });
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
