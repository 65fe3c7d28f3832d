//! A logger that writes every enabled record to stderr with the time since startup.

use lazy_static::lazy_static;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::{
	io::{self, Write},
	time::Instant,
};

lazy_static! {
	static ref LOGGER: Logger = Logger { start: Instant::now() };
}

struct Logger {
	start: Instant,
}
impl Log for Logger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			let elapsed = self.start.elapsed();
			let target =
				if record.target().len() > 0 { record.target() } else { record.module_path().unwrap_or_default() };
			let _ = writeln!(
				io::stderr(),
				"{:>4}.{:03} {:<5} [{}] {}",
				elapsed.as_secs(),
				elapsed.subsec_millis(),
				record.level(),
				target,
				record.args()
			);
		}
	}

	fn flush(&self) {
		let _ = io::stderr().flush();
	}
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
	log::set_logger(&*LOGGER)?;
	log::set_max_level(level);
	Ok(())
}
