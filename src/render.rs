//! Plain-text renderings of a module and its validation report.

use wasm_codec::{OracleOutcome, Report};

const LITERAL_WIDTH: usize = 12;
const DUMP_WIDTH: usize = 16;

/// A TypeScript function body returning `bytes` as a `Uint8Array`, twelve bytes per line.
pub fn typescript(bytes: &[u8], name: &str) -> String {
	let mut out = format!("// {} - {} bytes\nreturn new Uint8Array([\n", name, bytes.len());
	for line in bytes.chunks(LITERAL_WIDTH) {
		let line: Vec<String> = line.iter().map(|b| format!("0x{:02x}", b)).collect();
		out.push_str("    ");
		out.push_str(&line.join(", "));
		out.push_str(",\n");
	}
	out.push_str("]);");
	out
}

/// Offset, hex and printable-ASCII columns, sixteen bytes per line.
pub fn hexdump(bytes: &[u8]) -> String {
	let mut out = String::new();
	for (i, line) in bytes.chunks(DUMP_WIDTH).enumerate() {
		let hex: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
		let ascii: String = line.iter().map(|&b| if b == b' ' || b.is_ascii_graphic() { b as char } else { '.' }).collect();
		out.push_str(&format!("{:04x}  {:<48} {}\n", i * DUMP_WIDTH, hex.join(" "), ascii));
	}
	out
}

pub fn report(report: &Report) -> String {
	let mut out = String::new();
	for finding in &report.findings {
		let status = if finding.passed() { "ok" } else { "FAIL" };
		out.push_str(&format!("{:<4} {}\n", status, finding));
	}
	match &report.oracle {
		None => {},
		Some(OracleOutcome::Unavailable(reason)) => out.push_str(&format!("skip oracle: {}\n", reason)),
		Some(OracleOutcome::Match { len }) => out.push_str(&format!("ok   oracle: identical, {} bytes\n", len)),
		Some(outcome @ OracleOutcome::Mismatch { .. }) => {
			if let Some(finding) = outcome.as_finding() {
				out.push_str(&format!("FAIL {}\n", finding));
			}
		},
	}
	out
}
