use crate::syntax::modules::{FuncIdx, LocalIdx};
use alloc::vec::Vec;

/// The opcodes the encoder knows how to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
	Unreachable = 0x00,
	Nop = 0x01,
	End = 0x0B,
	Return = 0x0F,
	Call = 0x10,
	Drop = 0x1A,
	LocalGet = 0x20,
	I32Const = 0x41,
	I64Const = 0x42,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
	Unreachable,
	Nop,
	Return,
	Call(FuncIdx),
	Drop,
	LocalGet(LocalIdx),
	I32Const(i32),
	I64Const(i64),
}
impl Instr {
	pub fn opcode(&self) -> Opcode {
		match self {
			Instr::Unreachable => Opcode::Unreachable,
			Instr::Nop => Opcode::Nop,
			Instr::Return => Opcode::Return,
			Instr::Call(_) => Opcode::Call,
			Instr::Drop => Opcode::Drop,
			Instr::LocalGet(_) => Opcode::LocalGet,
			Instr::I32Const(_) => Opcode::I32Const,
			Instr::I64Const(_) => Opcode::I64Const,
		}
	}
}

/// An instruction sequence; the terminating `end` is implicit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expr(pub Vec<Instr>);
impl From<Vec<Instr>> for Expr {
	fn from(instrs: Vec<Instr>) -> Self {
		Expr(instrs)
	}
}
