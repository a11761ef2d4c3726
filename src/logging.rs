use std::{
    collections::hash_map::DefaultHasher,
    fs::File,
    hash::{Hash, Hasher},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, MutexGuard},
    thread,
};

use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Metadata, Record};

/// Prints records up to `console_level` and writes every record to the log file.
struct SplitLogger<W: Write + Send> {
    console_level: LevelFilter,
    log_file: Mutex<W>,
}

impl<W> SplitLogger<W>
where
    W: Write + Send,
{
    fn new(console_level: LevelFilter, log_file: W) -> Self {
        Self {
            console_level,
            log_file: Mutex::new(log_file),
        }
    }

    /// Locks the log file. Logging continues after a panic on another thread.
    fn log_file(&self) -> MutexGuard<'_, W> {
        match self.log_file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W> log::Log for SplitLogger<W>
where
    W: Write + Send,
{
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.level() <= self.console_level {
            if record.level() <= log::Level::Warn {
                eprintln!("{}: {}", record.level(), record.args());
            } else {
                println!("{}", record.args());
            }
        }
        let line = format!(
            "{} {:<5} [{:08x}] {}\r\n",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            pseudo_thread_id(),
            record.args()
        );
        if let Err(err) = self.log_file().write_all(line.as_bytes()) {
            eprintln!("error writing to log-file: {}", err);
        }
    }

    fn flush(&self) {
        if let Err(err) = self.log_file().flush() {
            eprintln!("error flushing log-file: {}", err);
        }
    }
}

/// Installs the global logger. `console_level` only filters the console;
/// the log file at `log_file_path` always receives every record.
pub fn init<P: AsRef<Path>>(console_level: LevelFilter, log_file_path: P) -> Result<()> {
    let file = File::create(&log_file_path).with_context(|| {
        format!(
            "could not create log file {}",
            log_file_path.as_ref().to_string_lossy()
        )
    })?;
    let logger = SplitLogger::new(console_level, BufWriter::new(file));
    log::set_boxed_logger(Box::new(logger)).context("could not set logger")?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// File name for a log started now, e.g. `2024-01-31_17-05-09.log`.
pub fn log_file_name() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S.log").to_string()
}

/// Stable per-thread number, unrelated to OS thread ids.
fn pseudo_thread_id() -> u32 {
    let mut hasher = DefaultHasher::new();
    thread::current().id().hash(&mut hasher);
    (hasher.finish() >> 32) as u32
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use log::Log;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<StdMutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn file_receives_records_below_console_level() {
        let buffer = SharedBuffer::default();
        let logger = SplitLogger::new(LevelFilter::Off, buffer.clone());
        logger.log(
            &Record::builder()
                .level(log::Level::Trace)
                .args(format_args!("swept {} rows", 4))
                .build(),
        );
        logger.flush();
        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(written.contains("TRACE"));
        assert!(written.ends_with("swept 4 rows\r\n"));
    }

    #[test]
    fn poisoned_log_file_is_still_written_and_flushed() {
        let logger = Arc::new(SplitLogger::new(LevelFilter::Off, Vec::new()));
        let poisoner = Arc::clone(&logger);
        let _ = thread::spawn(move || {
            let _guard = poisoner.log_file.lock().unwrap();
            panic!("poison the log file lock");
        })
        .join();
        assert!(logger.log_file.is_poisoned());

        logger.log(
            &Record::builder()
                .level(log::Level::Info)
                .args(format_args!("after poisoning"))
                .build(),
        );
        logger.flush();
        let written = String::from_utf8(logger.log_file().clone()).unwrap();
        assert!(written.ends_with("after poisoning\r\n"));
    }

    #[test]
    fn thread_id_is_stable_within_a_thread() {
        assert_eq!(pseudo_thread_id(), pseudo_thread_id());
    }

    #[test]
    fn log_file_name_has_timestamp_shape() {
        let name = log_file_name();
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "2024-01-31_17-05-09.log".len());
    }
}
