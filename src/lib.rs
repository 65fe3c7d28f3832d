//! Builds the `createWasmThatCallsPanic` loader fixture, cross-validates it, and hands the
//! bytes back for rendering.

pub mod config;
pub mod logger;
pub mod oracle;
pub mod render;

use config::Config;
use log::{info, warn};
use oracle::Wat2Wasm;
use std::{fmt, fs, io, path::Path};
use wasm_codec::{
	fixtures::{expected_panic_body, panic_module, PANIC_WAT},
	validate, Encoded, Oracle, Report,
};

#[derive(Debug)]
pub enum Error {
	Codec(wasm_codec::Error),
	Io(io::Error),
	Config(String),
}
impl From<wasm_codec::Error> for Error {
	fn from(e: wasm_codec::Error) -> Self {
		Error::Codec(e)
	}
}
impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Error::Io(e)
	}
}
impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Codec(e) => write!(f, "{}", e),
			Error::Io(e) => write!(f, "i/o error: {}", e),
			Error::Config(msg) => write!(f, "bad configuration: {}", msg),
		}
	}
}
impl std::error::Error for Error {}

pub struct Outcome {
	pub encoded: Encoded,
	pub report: Report,
}

pub fn run(config: &Config) -> Result<Outcome, Error> {
	let encoded = panic_module()?.encode()?;
	info!("built {} bytes", encoded.bytes.len());

	let wat2wasm = Wat2Wasm::new(config.wat2wasm.as_str(), config.oracle_timeout);
	let oracle: Option<(&dyn Oracle, &str)> = if config.oracle { Some((&wat2wasm as &dyn Oracle, PANIC_WAT)) } else { None };
	let report = validate(&encoded, &expected_panic_body(), oracle)?;

	let outcome = Outcome { encoded, report };
	if let Some(path) = &config.output {
		save(path, &outcome)?;
	}
	Ok(outcome)
}

/// Writes the binary to `path` only when every check passed. Returns whether it was written.
fn save(path: &Path, outcome: &Outcome) -> Result<bool, Error> {
	if !outcome.report.passed() {
		warn!("validation failed, not writing {}", path.display());
		return Ok(false);
	}
	fs::write(path, &outcome.encoded.bytes)?;
	info!("wrote {}", path.display());
	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use wasm_codec::valid::{Check, Finding, Observed};

	fn outcome(passed: bool) -> Outcome {
		let encoded = panic_module().unwrap().encode().unwrap();
		let actual = if passed { encoded.bytes.len() } else { encoded.bytes.len() - 1 };
		let finding = Finding {
			check: Check::TotalSize,
			subject: "total".into(),
			offset: None,
			expected: Observed::Len(encoded.bytes.len()),
			actual: Observed::Len(actual),
		};
		Outcome { encoded, report: Report { findings: vec![finding], oracle: None } }
	}

	#[test]
	fn failed_validation_writes_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("panic.wasm");
		assert!(!save(&path, &outcome(false)).unwrap());
		assert!(!path.exists());
	}

	#[test]
	fn passed_validation_writes_the_binary() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("panic.wasm");
		let outcome = outcome(true);
		assert!(save(&path, &outcome).unwrap());
		assert_eq!(fs::read(&path).unwrap(), outcome.encoded.bytes);
	}
}
