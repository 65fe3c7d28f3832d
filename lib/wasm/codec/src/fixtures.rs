//! The module the loader tests use to exercise panic handling: `doPanic` calls the
//! imported `env._panic` with `(100, 10)`.

use crate::{
	binary::modules::func_body,
	builder::ModuleBuilder,
	syntax::{
		instructions::{Expr, Instr},
		modules::{Func, FuncIdx, Module, TypeIdx},
		types::{FuncType, MemType, ValType},
	},
	Error,
};
use alloc::vec::Vec;

pub const PANIC_NAME: &str = "createWasmThatCallsPanic";

/// Text form of [`panic_module`].
pub const PANIC_WAT: &str = r#"(module
  (import "env" "_panic" (func $panic (param i32 i32)))
  (memory (export "memory") 1)
  (func (export "doPanic")
    i32.const 100
    i32.const 10
    call $panic))
"#;

pub fn do_panic(panic: FuncIdx, typ: TypeIdx) -> Func {
	Func { typ, locals: vec![], body: Expr(vec![Instr::I32Const(100), Instr::I32Const(10), Instr::Call(panic)]) }
}

pub fn panic_module() -> Result<Module, Error> {
	let mut builder = ModuleBuilder::new();
	let panic_type = builder.func_type(FuncType::new(vec![ValType::I32, ValType::I32], vec![]));
	let void_type = builder.func_type(FuncType::default());
	let panic = builder.import_func("env", "_panic", panic_type)?;
	let do_panic = builder.func(do_panic(panic, void_type));
	let memory = builder.memory(MemType::new(1, None));
	builder.export_memory("memory", memory);
	builder.export_func("doPanic", do_panic);
	Ok(builder.finish())
}

/// The `doPanic` body re-encoded on its own, to compare against what ends up in the
/// code section.
pub fn expected_panic_body() -> Vec<u8> {
	func_body(&do_panic(FuncIdx(0), TypeIdx(1)))
}
