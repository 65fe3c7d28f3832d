use crate::{binary::values::write_hex, valid::Finding};
use alloc::vec::Vec;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
	/// A negative value was handed to an unsigned encoder.
	InvalidInput { value: i64 },
	/// The input ended before a LEB128 terminating byte.
	TruncatedEncoding { offset: usize },
	/// A LEB128 encoding carries more bits than the target integer holds.
	Overflow { offset: usize },
	/// A section's declared length runs past the end of the module.
	TruncatedModule { offset: usize, declared: usize, available: usize },
	InvalidMagic { found: Vec<u8> },
	UnsupportedVersion { found: Vec<u8> },
	/// A module description that cannot be encoded as-is.
	Invalid(&'static str),
	ValidationMismatch(Finding),
}
impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::InvalidInput { value } => write!(f, "unsigned LEB128 requires a non-negative value, got {}", value),
			Error::TruncatedEncoding { offset } => write!(f, "unterminated LEB128 at offset {:#x}", offset),
			Error::Overflow { offset } => write!(f, "LEB128 at offset {:#x} does not fit in 64 bits", offset),
			Error::TruncatedModule { offset, declared, available } => write!(
				f,
				"section at offset {:#x} declares {} bytes but only {} remain",
				offset, declared, available
			),
			Error::InvalidMagic { found } => {
				f.write_str("invalid wasm magic number: ")?;
				write_hex(f, found)
			},
			Error::UnsupportedVersion { found } => {
				f.write_str("unsupported wasm version (expected 1): ")?;
				write_hex(f, found)
			},
			Error::Invalid(reason) => f.write_str(reason),
			Error::ValidationMismatch(finding) => write!(f, "validation failed: {}", finding),
		}
	}
}
