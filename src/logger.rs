//! `log` backend over any `core::fmt::Write` sink
//!
//! The sink is attached after the logger has been registered, so a logger can
//! live in a `static` and start receiving output once the port it writes to
//! has been configured. Records arriving with no sink attached are dropped.
//!
//! Output format, one record per line:
//! ```text
//! [DEBUG] sci_echo::drivers::sci: released from reset
//! ```

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

pub struct SinkLogger<W> {
    sink: Mutex<Option<W>>,
    level: LevelFilter,
}

impl<W> SinkLogger<W> {
    pub const fn new(level: LevelFilter) -> Self {
        Self {
            sink: Mutex::new(None),
            level,
        }
    }

    /// Attach a sink, returning the previous one.
    pub fn attach(&self, sink: W) -> Option<W> {
        self.sink.lock().replace(sink)
    }

    /// Detach and return the current sink.
    pub fn detach(&self) -> Option<W> {
        self.sink.lock().take()
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl<W: Write + Send> Log for SinkLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = self.sink.lock().as_mut() {
            // Nowhere to report a failing sink.
            let _ = writeln!(
                sink,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Register `logger` as the global `log` backend.
///
/// Fails if a logger has already been registered.
pub fn install<W: Write + Send>(logger: &'static SinkLogger<W>) -> Result<(), SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(logger.level());
    Ok(())
}
