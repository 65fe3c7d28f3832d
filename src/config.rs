//! Run configuration, read from the environment by the binary.

use crate::Error;
use log::LevelFilter;
use std::{env, path::PathBuf, time::Duration};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	/// `WASM_FIXTURES_LOG`: most verbose level written to stderr.
	pub log_level: LevelFilter,
	/// `WASM_FIXTURES_OUT`: where to write the generated binary, if anywhere.
	pub output: Option<PathBuf>,
	/// `WASM_FIXTURES_VALIDATE_ONLY`: skip the byte-array literal and hex dump.
	pub validate_only: bool,
	/// Cleared by `WASM_FIXTURES_NO_ORACLE`.
	pub oracle: bool,
	/// `WAT2WASM`: program used as the reference compiler.
	pub wat2wasm: String,
	/// `WAT2WASM_TIMEOUT_MS`
	pub oracle_timeout: Duration,
	/// `WASM_FIXTURES_QUIET`: validate without the oracle and print nothing but errors.
	pub quiet: bool,
}
impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: LevelFilter::Info,
			output: None,
			validate_only: false,
			oracle: true,
			wat2wasm: "wat2wasm".to_string(),
			oracle_timeout: Duration::from_secs(10),
			quiet: false,
		}
	}
}
impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_vars(|key| env::var(key).ok())
	}

	pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let mut config = Self::default();
		if let Some(level) = var("WASM_FIXTURES_LOG") {
			config.log_level =
				level.parse().map_err(|_| Error::Config(format!("WASM_FIXTURES_LOG: unknown level {:?}", level)))?;
		}
		if let Some(path) = var("WASM_FIXTURES_OUT").filter(|p| !p.is_empty()) {
			config.output = Some(PathBuf::from(path));
		}
		if let Some(flag) = var("WASM_FIXTURES_VALIDATE_ONLY") {
			config.validate_only = parse_flag("WASM_FIXTURES_VALIDATE_ONLY", &flag)?;
		}
		if let Some(flag) = var("WASM_FIXTURES_NO_ORACLE") {
			config.oracle = !parse_flag("WASM_FIXTURES_NO_ORACLE", &flag)?;
		}
		if let Some(program) = var("WAT2WASM").filter(|p| !p.is_empty()) {
			config.wat2wasm = program;
		}
		if let Some(ms) = var("WAT2WASM_TIMEOUT_MS") {
			let ms = ms.parse().map_err(|_| Error::Config(format!("WAT2WASM_TIMEOUT_MS: not a number: {:?}", ms)))?;
			config.oracle_timeout = Duration::from_millis(ms);
		}
		if let Some(flag) = var("WASM_FIXTURES_QUIET") {
			config.quiet = parse_flag("WASM_FIXTURES_QUIET", &flag)?;
		}
		if config.quiet {
			config.log_level = config.log_level.min(LevelFilter::Error);
			config.validate_only = true;
			config.oracle = false;
		}
		Ok(config)
	}
}

fn parse_flag(key: &str, value: &str) -> Result<bool, Error> {
	match value.trim().to_ascii_lowercase().as_str() {
		"" | "0" | "false" | "no" => Ok(false),
		"1" | "true" | "yes" => Ok(true),
		_ => Err(Error::Config(format!("{}: expected a boolean, got {:?}", key, value))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
		let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		Config::from_vars(|key| vars.get(key).cloned())
	}

	#[test]
	fn defaults() {
		assert_eq!(config(&[]).unwrap(), Config::default());
	}

	#[test]
	fn overrides() {
		let config = config(&[
			("WASM_FIXTURES_LOG", "trace"),
			("WASM_FIXTURES_OUT", "panic.wasm"),
			("WASM_FIXTURES_VALIDATE_ONLY", "yes"),
			("WASM_FIXTURES_NO_ORACLE", "1"),
			("WAT2WASM", "/opt/wabt/bin/wat2wasm"),
			("WAT2WASM_TIMEOUT_MS", "250"),
		])
		.unwrap();
		assert_eq!(config.log_level, LevelFilter::Trace);
		assert_eq!(config.output, Some(PathBuf::from("panic.wasm")));
		assert!(config.validate_only);
		assert!(!config.oracle);
		assert_eq!(config.wat2wasm, "/opt/wabt/bin/wat2wasm");
		assert_eq!(config.oracle_timeout, Duration::from_millis(250));
	}

	#[test]
	fn quiet_implies_offline_and_silent() {
		let quiet = config(&[("WASM_FIXTURES_QUIET", "true"), ("WASM_FIXTURES_LOG", "debug")]).unwrap();
		assert!(quiet.quiet);
		assert!(quiet.validate_only);
		assert!(!quiet.oracle);
		assert_eq!(quiet.log_level, LevelFilter::Error);

		let off = config(&[("WASM_FIXTURES_QUIET", "1"), ("WASM_FIXTURES_LOG", "off")]).unwrap();
		assert_eq!(off.log_level, LevelFilter::Off);
	}

	#[test]
	fn rejects_garbage() {
		assert!(config(&[("WASM_FIXTURES_LOG", "loud")]).is_err());
		assert!(config(&[("WASM_FIXTURES_VALIDATE_ONLY", "maybe")]).is_err());
		assert!(config(&[("WAT2WASM_TIMEOUT_MS", "-5")]).is_err());
		assert!(config(&[("WASM_FIXTURES_QUIET", "sometimes")]).is_err());
	}
}
