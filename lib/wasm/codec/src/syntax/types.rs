use alloc::vec::Vec;
use core::convert::TryFrom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValType {
	I32 = 0x7F,
	I64 = 0x7E,
	F32 = 0x7D,
	F64 = 0x7C,
}
impl TryFrom<u8> for ValType {
	type Error = &'static str;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0x7F => Ok(ValType::I32),
			0x7E => Ok(ValType::I64),
			0x7D => Ok(ValType::F32),
			0x7C => Ok(ValType::F64),
			_ => Err("invalid ValType"),
		}
	}
}

/// Two signatures are equal iff their parameter and result lists are pairwise equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FuncType {
	pub params: Vec<ValType>,
	pub results: Vec<ValType>,
}
impl FuncType {
	pub fn new(params: Vec<ValType>, results: Vec<ValType>) -> Self {
		Self { params, results }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
	pub min: u32,
	pub max: Option<u32>,
}

/// Sizes are in 64 KiB pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemType {
	pub lim: Limits,
}
impl MemType {
	pub fn new(min: u32, max: Option<u32>) -> Self {
		Self { lim: Limits { min, max } }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valtype_tags_round_trip() {
		for typ in [ValType::I32, ValType::I64, ValType::F32, ValType::F64].iter() {
			assert_eq!(ValType::try_from(*typ as u8), Ok(*typ));
		}
		assert!(ValType::try_from(0x60).is_err());
	}

	#[test]
	fn signature_equality_is_pairwise() {
		let a = FuncType::new(vec![ValType::I32, ValType::I32], vec![]);
		assert_eq!(a, FuncType::new(vec![ValType::I32, ValType::I32], vec![]));
		assert_ne!(a, FuncType::new(vec![ValType::I32], vec![ValType::I32]));
		assert_ne!(a, FuncType::new(vec![ValType::I32, ValType::I64], vec![]));
	}
}
