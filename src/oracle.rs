//! `wat2wasm` from the WebAssembly Binary Toolkit as a source of reference binaries.

use log::debug;
use std::{
	fs::{self, File},
	path::PathBuf,
	process::{Child, Command, ExitStatus, Stdio},
	thread,
	time::{Duration, Instant},
};
use wasm_codec::{Oracle, Unavailable};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Longest slice of the compiler's stderr carried into an `Unavailable` reason.
const STDERR_LIMIT: usize = 1024;

/// Compiles WAT by running `<program> module.wat -o module.wasm` in a scratch directory.
#[derive(Clone, Debug)]
pub struct Wat2Wasm {
	program: String,
	timeout: Duration,
}
impl Wat2Wasm {
	pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
		Self { program: program.into(), timeout }
	}

	fn locate(&self) -> Result<PathBuf, Unavailable> {
		which::which(&self.program).map_err(|e| Unavailable(format!("{} not found: {}", self.program, e)))
	}
}
impl Oracle for Wat2Wasm {
	fn compile(&self, wat: &str) -> Result<Vec<u8>, Unavailable> {
		let program = self.locate()?;
		let dir = tempfile::tempdir().map_err(|e| Unavailable(format!("cannot create scratch directory: {}", e)))?;
		let wat_path = dir.path().join("module.wat");
		let wasm_path = dir.path().join("module.wasm");
		let stderr_path = dir.path().join("stderr.txt");
		fs::write(&wat_path, wat).map_err(|e| Unavailable(format!("cannot write {}: {}", wat_path.display(), e)))?;

		let stderr = File::create(&stderr_path)
			.map_err(|e| Unavailable(format!("cannot create {}: {}", stderr_path.display(), e)))?;

		debug!("running {} {}", program.display(), wat_path.display());
		let mut child = Command::new(&program)
			.arg(&wat_path)
			.arg("-o")
			.arg(&wasm_path)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(stderr)
			.spawn()
			.map_err(|e| Unavailable(format!("cannot run {}: {}", program.display(), e)))?;

		let status = wait_timeout(&mut child, self.timeout)?;
		if !status.success() {
			let stderr = fs::read_to_string(&stderr_path).unwrap_or_default();
			let stderr: String = stderr.trim().chars().take(STDERR_LIMIT).collect();
			return Err(Unavailable(format!("{} failed ({}): {}", program.display(), status, stderr)));
		}
		fs::read(&wasm_path).map_err(|e| Unavailable(format!("cannot read {}: {}", wasm_path.display(), e)))
	}
}

fn wait_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, Unavailable> {
	let start = Instant::now();
	loop {
		match child.try_wait() {
			Ok(Some(status)) => return Ok(status),
			Ok(None) if start.elapsed() >= timeout => {
				reap(child);
				return Err(Unavailable(format!("timed out after {} ms", timeout.as_millis())));
			},
			Ok(None) => thread::sleep(POLL_INTERVAL),
			Err(e) => {
				reap(child);
				return Err(Unavailable(format!("cannot wait for child: {}", e)));
			},
		}
	}
}

fn reap(child: &mut Child) {
	let _ = child.kill();
	let _ = child.wait();
}
