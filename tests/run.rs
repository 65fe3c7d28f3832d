use std::fs;
use wasm_codec::{parse_sections, OracleOutcome};
use wasm_fixtures::{config::Config, render, run};

fn offline() -> Config {
	Config { oracle: false, ..Config::default() }
}

#[test]
fn builds_and_validates() {
	let outcome = run(&offline()).unwrap();
	assert!(outcome.report.passed());
	assert!(outcome.report.oracle.is_none());
	assert_eq!(outcome.encoded.bytes.len(), 79);
	assert_eq!(parse_sections(&outcome.encoded.bytes).unwrap().total(), 79);
}

#[test]
fn writes_output() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("panic.wasm");
	let outcome = run(&Config { output: Some(path.clone()), ..offline() }).unwrap();
	assert_eq!(fs::read(&path).unwrap(), outcome.encoded.bytes);
}

#[test]
fn missing_oracle_does_not_fail() {
	let config = Config { wat2wasm: "wat2wasm-that-does-not-exist".into(), ..Config::default() };
	let outcome = run(&config).unwrap();
	assert!(matches!(outcome.report.oracle, Some(OracleOutcome::Unavailable(_))));
	assert!(outcome.report.passed());
}

#[test]
fn renders_fixture() {
	let outcome = run(&offline()).unwrap();
	let literal = render::typescript(&outcome.encoded.bytes, "createWasmThatCallsPanic");
	assert!(literal.starts_with("// createWasmThatCallsPanic - 79 bytes\nreturn new Uint8Array([\n    0x00, 0x61, 0x73, 0x6d,"));
	assert_eq!(literal.lines().count(), 2 + 7 + 1);

	let dump = render::hexdump(&outcome.encoded.bytes);
	assert_eq!(dump.lines().count(), 5);
	assert!(dump.starts_with("0000  00 61 73 6d 01 00 00 00"));
}
