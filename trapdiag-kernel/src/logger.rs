use core::fmt::Write;

use ansi_rgb::{cyan_blue, green, red, yellow, Foreground};
use log::{Level, Log, Metadata, Record};
use rgb::RGB8;
use trapdiag::config;
use trapdiag::console::ConsoleWriter;

use crate::uart::Pl011;

struct UartLogger;

static LOGGER: UartLogger = UartLogger;

fn level_color(level: Level) -> RGB8 {
    match level {
        Level::Error => red(),
        Level::Warn => yellow(),
        Level::Info => green(),
        Level::Debug => cyan_blue(),
        Level::Trace => RGB8::new(0x80, 0x80, 0x80),
    }
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut uart = Pl011::new();
        let _ = writeln!(
            ConsoleWriter(&mut uart),
            "[{}] {}",
            record.level().fg(level_color(record.level())),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Routes `log` records to the UART at the build-time level.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config::log_level());
    }
}
