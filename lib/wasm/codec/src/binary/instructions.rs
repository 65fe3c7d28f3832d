use crate::{
	binary::values::{sleb128, uleb128},
	syntax::instructions::{Expr, Instr, Opcode},
};
use alloc::vec::Vec;

fn instr(instr: &Instr, out: &mut Vec<u8>) {
	out.push(instr.opcode() as u8);
	match instr {
		Instr::Call(x) => out.extend(uleb128(x.0 as u64)),
		Instr::LocalGet(x) => out.extend(uleb128(x.0 as u64)),
		Instr::I32Const(n) => out.extend(sleb128(*n as i64)),
		Instr::I64Const(n) => out.extend(sleb128(*n)),
		Instr::Unreachable | Instr::Nop | Instr::Return | Instr::Drop => {},
	}
}

pub fn expr(expr: &Expr) -> Vec<u8> {
	let mut out = vec![];
	for i in &expr.0 {
		instr(i, &mut out);
	}
	out.push(Opcode::End as u8);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::modules::{FuncIdx, LocalIdx};

	#[test]
	fn immediates() {
		let e = Expr(vec![
			Instr::I32Const(100),
			Instr::I32Const(-1),
			Instr::I64Const(-65),
			Instr::LocalGet(LocalIdx(128)),
			Instr::Call(FuncIdx(0)),
			Instr::Drop,
		]);
		assert_eq!(
			expr(&e),
			[0x41, 0xE4, 0x00, 0x41, 0x7F, 0x42, 0xBF, 0x7F, 0x20, 0x80, 0x01, 0x10, 0x00, 0x1A, 0x0B]
		);
	}

	#[test]
	fn empty_expr_is_just_end() {
		assert_eq!(expr(&Expr::default()), [0x0B]);
	}
}
