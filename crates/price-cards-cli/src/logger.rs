use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped log lines to stderr
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(
                stderr,
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    fn enabled(logger: &StderrLogger, level: Level) -> bool {
        logger.enabled(&Metadata::builder().level(level).build())
    }

    #[test]
    fn test_verbosity_levels() {
        let quiet = StderrLogger::new(0);
        assert!(enabled(&quiet, Level::Warn));
        assert!(!enabled(&quiet, Level::Info));

        assert!(enabled(&StderrLogger::new(1), Level::Info));
        assert!(!enabled(&StderrLogger::new(1), Level::Debug));
        assert!(enabled(&StderrLogger::new(3), Level::Debug));
    }

    #[test]
    fn test_init_installs_global_logger() {
        StderrLogger::new(1).init().unwrap();
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(StderrLogger::new(0).init().is_err());
    }
}
