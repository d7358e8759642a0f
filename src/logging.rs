//! log facade backend for the monitor
//!
//! the kernel hands over whatever it uses for debug output (usually a serial port) as a plain function, the monitor
//! never logs to the console it's talking to the operator on

use core::{fmt, fmt::Write};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

/// where log lines end up
pub type Sink = fn(&str);

/// wrapper struct to allow us to write!() to the sink
struct SinkWriter(Sink);

impl Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}

/// simple logger implementation over a sink
struct Logger {
    sink: Once<Sink>,
    max_level: Once<LevelFilter>,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= *self.max_level.get().unwrap_or(&LevelFilter::Off)
    }

    #[allow(unused_must_use)]
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(sink) = self.sink.get() {
            let mut writer = SinkWriter(*sink);
            let level = record.level();
            let width = 5;
            let args = record.args();

            if let Some(path) = record.module_path() {
                writeln!(&mut writer, "{level:width$} [{path}] {args}");
            } else {
                writeln!(&mut writer, "{level:width$} [unknown] {args}");
            }
        }
    }

    fn flush(&self) {}
}

/// our logger that we will log things with
static LOGGER: Logger = Logger { sink: Once::new(), max_level: Once::new() };

/// initialize the logger, setting the max level in the process
///
/// only the first call picks the sink and level, later calls fail like `log::set_logger` does
pub fn init(sink: Sink, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;

    LOGGER.sink.call_once(|| sink);
    let level = *LOGGER.max_level.call_once(|| max_level);
    log::set_max_level(level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static LINES: Mutex<String> = Mutex::new(String::new());

    fn capture(s: &str) {
        LINES.lock().unwrap().push_str(s);
    }

    #[test]
    fn formats_level_and_module() {
        init(capture, LevelFilter::Info).unwrap();

        log::info!("walking {:#x}", 0x1000);
        log::debug!("filtered out");

        let lines = LINES.lock().unwrap();
        assert!(lines.contains("INFO  [kmonitor::logging::tests] walking 0x1000\n"));
        assert!(!lines.contains("filtered out"));
    }
}
