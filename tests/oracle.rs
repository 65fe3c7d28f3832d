#![cfg(unix)]

use log::Level;
use std::{
	fs,
	os::unix::fs::PermissionsExt,
	path::Path,
	time::{Duration, Instant},
};
use wasm_codec::{Oracle, Unavailable};
use wasm_fixtures::oracle::Wat2Wasm;

fn script(dir: &Path, name: &str, body: &str) -> String {
	let path = dir.join(name);
	fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
	fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
	path.to_str().unwrap().to_string()
}

#[test]
fn missing_program() {
	let _ = simple_logger::init_with_level(Level::Debug);
	let oracle = Wat2Wasm::new("wat2wasm-that-does-not-exist", Duration::from_secs(1));
	let Unavailable(reason) = oracle.compile("(module)").unwrap_err();
	assert!(reason.contains("not found"), "{}", reason);
}

// Every case that spawns a child runs in this one test, so no other thread forks while a
// script file is still open for writing.
#[test]
fn external_compiler() {
	let _ = simple_logger::init_with_level(Level::Debug);
	let dir = tempfile::tempdir().unwrap();

	// Arguments are `module.wat -o module.wasm`; copying the input makes the output checkable.
	let copy = Wat2Wasm::new(script(dir.path(), "copy", "cp \"$1\" \"$3\""), Duration::from_secs(10));
	assert_eq!(copy.compile("(module)").unwrap(), b"(module)".to_vec());

	let failing = Wat2Wasm::new(script(dir.path(), "fail", "echo 'syntax error' >&2; exit 1"), Duration::from_secs(10));
	let Unavailable(reason) = failing.compile("(module)").unwrap_err();
	assert!(reason.contains("syntax error"), "{}", reason);

	// well past a pipe buffer; the failure still surfaces as a failed compile, promptly
	let noisy = Wat2Wasm::new(
		script(dir.path(), "noisy", "head -c 200000 /dev/zero | tr '\\0' e >&2; exit 1"),
		Duration::from_secs(10),
	);
	let started = Instant::now();
	let Unavailable(reason) = noisy.compile("(module)").unwrap_err();
	assert!(started.elapsed() < Duration::from_secs(5), "{:?}", started.elapsed());
	assert!(!reason.contains("timed out"), "{}", reason.get(..80).unwrap_or(reason.as_str()));
	assert!(reason.contains("failed") && reason.contains("eeee"), "{}", reason.get(..80).unwrap_or(reason.as_str()));
	assert!(reason.len() < 2048);

	let silent = Wat2Wasm::new(script(dir.path(), "silent", "exit 0"), Duration::from_secs(10));
	let Unavailable(reason) = silent.compile("(module)").unwrap_err();
	assert!(reason.contains("module.wasm"), "{}", reason);

	let slow = Wat2Wasm::new(script(dir.path(), "slow", "sleep 5"), Duration::from_millis(100));
	let Unavailable(reason) = slow.compile("(module)").unwrap_err();
	assert!(reason.contains("timed out"), "{}", reason);
}
