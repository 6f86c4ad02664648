use log::LevelFilter;

/// Number of bug sites the registry can hold.
pub const BUG_TABLE_CAPACITY: usize = 64;

/// Log level used when `TRAPDIAG_LOG` is unset or unparsable at build time.
///
/// Anything chattier than `Warn` interleaves log records with the register
/// dump on a shared UART.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

pub fn log_level() -> LevelFilter {
    parse_level(option_env!("TRAPDIAG_LOG"))
}

fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}
