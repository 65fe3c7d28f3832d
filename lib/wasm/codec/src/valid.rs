//! Cross-checks between what the builder reports having produced and what an independent
//! walk over the bytes finds.

pub mod modules;

mod checks;
mod oracle;

pub use checks::{check_bytes, check_leb128, check_sizes, code_body};
pub use oracle::{cross_validate, Diff, Oracle, OracleOutcome, Unavailable};

use crate::{
	binary::{modules::Encoded, sections::parse_sections, values::write_hex},
	Error,
};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
	Leb128,
	SectionSize,
	TotalSize,
	Bytes,
	Oracle,
}
impl fmt::Display for Check {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Check::Leb128 => "leb128",
			Check::SectionSize => "section size",
			Check::TotalSize => "total size",
			Check::Bytes => "bytes",
			Check::Oracle => "oracle",
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observed {
	Len(usize),
	Bytes(Vec<u8>),
}
impl fmt::Display for Observed {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Observed::Len(len) => write!(f, "{} bytes", len),
			Observed::Bytes(bytes) => {
				f.write_char('[')?;
				write_hex(f, bytes)?;
				f.write_char(']')
			},
		}
	}
}

/// One comparison: passes when what was observed equals what was expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
	pub check: Check,
	pub subject: String,
	pub offset: Option<usize>,
	pub expected: Observed,
	pub actual: Observed,
}
impl Finding {
	pub fn passed(&self) -> bool {
		self.expected == self.actual
	}
}
impl fmt::Display for Finding {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} {}", self.check, self.subject)?;
		if let Some(offset) = self.offset {
			write!(f, " @{:02x}", offset)?;
		}
		write!(f, ": expected {}, found {}", self.expected, self.actual)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
	pub findings: Vec<Finding>,
	/// `None` when no oracle was consulted.
	pub oracle: Option<OracleOutcome>,
}
impl Report {
	/// An unavailable oracle does not fail the report; a disagreeing one does.
	pub fn passed(&self) -> bool {
		self.failures().next().is_none() && !matches!(self.oracle, Some(OracleOutcome::Mismatch { .. }))
	}

	pub fn failures(&self) -> impl Iterator<Item = &Finding> {
		self.findings.iter().filter(|f| !f.passed())
	}

	pub fn into_result(self) -> Result<Self, Error> {
		if let Some(failure) = self.failures().next() {
			return Err(Error::ValidationMismatch(failure.clone()));
		}
		if let Some(failure) = self.oracle.as_ref().and_then(OracleOutcome::as_finding) {
			return Err(Error::ValidationMismatch(failure));
		}
		Ok(self)
	}
}

/// Runs every check against `encoded`: the LEB128 reference vectors, builder sizes
/// against parsed sizes, the fixed byte sequences, and the oracle when one is given.
/// `expected_body` is the first function body as the codec encodes it.
pub fn validate(encoded: &Encoded, expected_body: &[u8], oracle: Option<(&dyn Oracle, &str)>) -> Result<Report, Error> {
	info!("cross-validating...");
	let index = parse_sections(&encoded.bytes)?;

	let mut findings = check_leb128();
	findings.extend(check_sizes(&encoded.sizes, &index, encoded.bytes.len()));
	findings.extend(check_bytes(&encoded.bytes, &index, expected_body));
	for failure in findings.iter().filter(|f| !f.passed()) {
		warn!("{}", failure);
	}

	let oracle = oracle.map(|(oracle, wat)| cross_validate(oracle, wat, &encoded.bytes));
	Ok(Report { findings, oracle })
}
