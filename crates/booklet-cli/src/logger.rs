use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes log records to stderr with a local timestamp
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S");
        match record.level() {
            Level::Error | Level::Warn => {
                eprintln!("[{} {:5}] {}", timestamp, record.level(), record.args())
            }
            _ => eprintln!("[{}] {}", timestamp, record.args()),
        }
    }

    fn flush(&self) {}
}
