//! Console and file logger.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to both the console and a file. The odometry code logs through
//! the standard macros, so any other `log` backend works just as well.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use deadwheel::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).expect("Logger init failed");
//! info!("Program started");
//! ```
//!
//! # Log Output
//!
//! Each line holds the level, the time since the logger started, the target
//! and the message:
//!
//! ```text
//! INFO [2m 5s 123ms] deadwheel::motion::odom::task - Dead Wheel Tracking Started
//! WARN [2m 5s 456ms] deadwheel::motion::odom::devices - IMU Error: ...
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Default log file, relative to the working directory (the SD card root on V5).
pub const LOG_FILE: &str = "log.txt";

/// A dual-output logger.
///
/// Writes log messages to both the console and a file. The file is
/// created or truncated when the logger is initialized.
pub struct DeadwheelLogger {
    /// `None` if the file could not be opened (e.g. no SD card present).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
    #[cfg(not(feature = "vexide"))]
    started:     std::time::Instant,
}

impl DeadwheelLogger {
    fn new(path: &Path) -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
            #[cfg(not(feature = "vexide"))]
            started: std::time::Instant::now(),
        }
    }

    #[cfg(feature = "vexide")]
    fn uptime(&self) -> Duration { vexide::time::user_uptime() }

    #[cfg(not(feature = "vexide"))]
    fn uptime(&self) -> Duration { self.started.elapsed() }
}

/// Formats one log line, newline included.
fn format_line(record: &Record, uptime: Duration) -> String {
    // Whole milliseconds keep the stamp short
    let uptime = Duration::from_millis(uptime.as_millis() as u64);
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        format_duration(uptime),
        record.target(),
        record.args()
    )
}

impl log::Log for DeadwheelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_line = format_line(record, self.uptime());

            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(ref mut writer) = *writer_guard {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<DeadwheelLogger> = OnceLock::new();

/// Initializes the logger, writing to [`LOG_FILE`].
///
/// # Arguments
///
/// * `level` - The minimum log level to record. Use [`LevelFilter::Trace`]
///   to see every odometry step.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> { init_with_path(level, LOG_FILE) }

/// Initializes the logger, writing to `path`.
///
/// Only the first call opens a file; later calls fail with
/// [`SetLoggerError`] and keep writing to the first file.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init_with_path(level: LevelFilter, path: impl AsRef<Path>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| DeadwheelLogger::new(path.as_ref()));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
