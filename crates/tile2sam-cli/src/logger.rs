//! CLI logger.

use std::io;

/// Initialize the global logger.
///
/// # Arguments
///
/// * `level` - Log level.
pub fn init_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stdout())
        .apply()
}
