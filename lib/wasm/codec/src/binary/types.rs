use crate::{
	binary::values::{encode_vec_byte, uleb128},
	syntax::types::{FuncType, Limits, MemType, ValType},
};
use alloc::vec::Vec;

/// Type constructor tag for function signatures.
pub const FUNC_TYPE: u8 = 0x60;

pub fn valtype(typ: ValType) -> u8 {
	typ as u8
}

pub fn functype(typ: &FuncType) -> Vec<u8> {
	let params: Vec<u8> = typ.params.iter().map(|t| valtype(*t)).collect();
	let results: Vec<u8> = typ.results.iter().map(|t| valtype(*t)).collect();

	let mut out = vec![FUNC_TYPE];
	out.extend(encode_vec_byte(&params));
	out.extend(encode_vec_byte(&results));
	out
}

fn limits(lim: &Limits) -> Vec<u8> {
	match lim.max {
		None => {
			let mut out = vec![0x00];
			out.extend(uleb128(lim.min as u64));
			out
		},
		Some(max) => {
			let mut out = vec![0x01];
			out.extend(uleb128(lim.min as u64));
			out.extend(uleb128(max as u64));
			out
		},
	}
}

pub fn memtype(typ: &MemType) -> Vec<u8> {
	limits(&typ.lim)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn signatures() {
		let panic = FuncType::new(vec![ValType::I32, ValType::I32], vec![]);
		assert_eq!(functype(&panic), [0x60, 0x02, 0x7F, 0x7F, 0x00]);
		assert_eq!(functype(&FuncType::default()), [0x60, 0x00, 0x00]);
		let mixed = FuncType::new(vec![ValType::F32], vec![ValType::I64, ValType::F64]);
		assert_eq!(functype(&mixed), [0x60, 0x01, 0x7D, 0x02, 0x7E, 0x7C]);
	}

	#[test]
	fn memory_limits() {
		assert_eq!(memtype(&MemType::new(1, None)), [0x00, 0x01]);
		assert_eq!(memtype(&MemType::new(2, Some(200))), [0x01, 0x02, 0xC8, 0x01]);
	}
}
