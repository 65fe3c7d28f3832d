use crate::valid::{Check, Finding, Observed};
use alloc::{string::String, vec::Vec};
use core::fmt;

/// Why an oracle could not produce reference bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unavailable(pub String);
impl fmt::Display for Unavailable {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// An external producer of reference binaries, such as a WAT compiler.
pub trait Oracle {
	fn compile(&self, wat: &str) -> Result<Vec<u8>, Unavailable>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diff {
	pub offset: usize,
	pub ours: u8,
	pub reference: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleOutcome {
	Unavailable(String),
	Match { len: usize },
	Mismatch { ours: usize, reference: usize, first_diff: Option<Diff> },
}
impl OracleOutcome {
	pub fn as_finding(&self) -> Option<Finding> {
		match *self {
			OracleOutcome::Mismatch { ours, reference, first_diff } => Some(match first_diff {
				Some(diff) => Finding {
					check: Check::Oracle,
					subject: "reference binary".into(),
					offset: Some(diff.offset),
					expected: Observed::Bytes(vec![diff.reference]),
					actual: Observed::Bytes(vec![diff.ours]),
				},
				None => Finding {
					check: Check::Oracle,
					subject: "reference binary".into(),
					offset: None,
					expected: Observed::Len(reference),
					actual: Observed::Len(ours),
				},
			}),
			_ => None,
		}
	}
}

pub fn cross_validate(oracle: &dyn Oracle, wat: &str, ours: &[u8]) -> OracleOutcome {
	let reference = match oracle.compile(wat) {
		Ok(reference) => reference,
		Err(Unavailable(reason)) => {
			info!("oracle unavailable: {}", reason);
			return OracleOutcome::Unavailable(reason);
		},
	};

	if reference == ours {
		return OracleOutcome::Match { len: reference.len() };
	}
	let first_diff = ours
		.iter()
		.zip(&reference)
		.enumerate()
		.find(|(_, (a, b))| a != b)
		.map(|(offset, (a, b))| Diff { offset, ours: *a, reference: *b });
	warn!("oracle disagrees: ours={} bytes, reference={} bytes", ours.len(), reference.len());
	OracleOutcome::Mismatch { ours: ours.len(), reference: reference.len(), first_diff }
}
