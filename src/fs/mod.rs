//! Filesystem utilities.
//!
//! # Logging
//!
//! The `logger` submodule provides a file-based logger that writes to
//! `log.txt` (or a chosen path) as well as the console. On a V5 brain the
//! file lands on the SD card.
//!
//! # Example
//!
//! ```ignore
//! use deadwheel::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Tracker configured");
//! ```

/// Console and file logging.
pub mod logger;
