use crate::{
	binary::modules::Encoded,
	syntax::{
		modules::{Export, ExportDesc, Func, FuncIdx, Import, ImportDesc, Mem, MemIdx, Module, TypeIdx},
		types::{FuncType, MemType},
	},
	Error,
};
use alloc::vec::Vec;

/// Assembles a [`Module`] one declaration at a time, handing back the index each
/// declaration occupies. Imports take the low indices of their index space, so they have
/// to be declared before any local function or memory.
#[derive(Clone, Debug, Default)]
pub struct ModuleBuilder {
	types: Vec<FuncType>,
	imports: Vec<Import>,
	funcs: Vec<Func>,
	mems: Vec<Mem>,
	exports: Vec<Export>,
}
impl ModuleBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a signature, reusing the index of an identical one.
	pub fn func_type(&mut self, typ: FuncType) -> TypeIdx {
		if let Some(idx) = self.types.iter().position(|t| *t == typ) {
			return TypeIdx(idx as u32);
		}
		debug!("type {}: {:?} -> {:?}", self.types.len(), typ.params, typ.results);
		self.types.push(typ);
		TypeIdx(self.types.len() as u32 - 1)
	}

	pub fn import_func(&mut self, module: &str, name: &str, typ: TypeIdx) -> Result<FuncIdx, Error> {
		if !self.funcs.is_empty() {
			return Err(Error::Invalid("imports must be declared before local functions"));
		}
		let idx = FuncIdx(self.imported_funcs() as u32);
		debug!("import func {}: {}.{}", idx.0, module, name);
		self.imports.push(Import { module: module.into(), name: name.into(), desc: ImportDesc::Func(typ) });
		Ok(idx)
	}

	pub fn import_memory(&mut self, module: &str, name: &str, typ: MemType) -> Result<MemIdx, Error> {
		if !self.mems.is_empty() {
			return Err(Error::Invalid("imports must be declared before local memories"));
		}
		let idx = MemIdx(self.imported_mems() as u32);
		debug!("import memory {}: {}.{}", idx.0, module, name);
		self.imports.push(Import { module: module.into(), name: name.into(), desc: ImportDesc::Mem(typ) });
		Ok(idx)
	}

	pub fn func(&mut self, func: Func) -> FuncIdx {
		let idx = FuncIdx((self.imported_funcs() + self.funcs.len()) as u32);
		debug!("func {}: type {}", idx.0, func.typ.0);
		self.funcs.push(func);
		idx
	}

	pub fn memory(&mut self, typ: MemType) -> MemIdx {
		let idx = MemIdx((self.imported_mems() + self.mems.len()) as u32);
		self.mems.push(Mem { typ });
		idx
	}

	pub fn export_func(&mut self, name: &str, idx: FuncIdx) {
		self.exports.push(Export { name: name.into(), desc: ExportDesc::Func(idx) });
	}

	pub fn export_memory(&mut self, name: &str, idx: MemIdx) {
		self.exports.push(Export { name: name.into(), desc: ExportDesc::Mem(idx) });
	}

	pub fn finish(self) -> Module {
		Module::new(self.types, self.imports, self.funcs, self.mems, self.exports)
	}

	pub fn build(self) -> Result<Encoded, Error> {
		self.finish().encode()
	}

	fn imported_funcs(&self) -> usize {
		self.imports.iter().filter(|i| i.desc.as_func().is_some()).count()
	}

	fn imported_mems(&self) -> usize {
		self.imports.iter().filter(|i| i.desc.as_mem().is_some()).count()
	}
}
