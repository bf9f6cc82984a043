use std::io;

use fern::colors::{Color, ColoredLevelConfig};

/// Console logging for the `fpack` binary. Per-file progress goes out at
/// info level, skipped entries at warn.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub level: log::LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
        }
    }
}

impl LoggerConfig {
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let colors = ColoredLevelConfig::new()
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red)
            .debug(Color::Blue)
            .trace(Color::Magenta);

        fern::Dispatch::new()
            .level(self.level)
            .format(move |out, message, record| {
                out.finish(format_args!("[{}] {}", colors.color(record.level()), message))
            })
            .chain(io::stdout())
            .apply()
    }
}
