use crate::{
	binary::modules::{module, Encoded},
	syntax::{
		instructions::Expr,
		types::{FuncType, MemType, ValType},
	},
	valid::modules::validate_module,
	Error,
};
use alloc::{string::String, vec::Vec};

/// The section kinds this codec emits, in the order they must appear in a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
	Type = 1,
	Import = 2,
	Function = 3,
	Memory = 5,
	Export = 7,
	Code = 10,
}
impl SectionKind {
	pub const ALL: [SectionKind; 6] = [
		SectionKind::Type,
		SectionKind::Import,
		SectionKind::Function,
		SectionKind::Memory,
		SectionKind::Export,
		SectionKind::Code,
	];

	pub fn id(self) -> u8 {
		self as u8
	}

	pub fn from_id(id: u8) -> Option<Self> {
		Self::ALL.iter().copied().find(|kind| kind.id() == id)
	}

	pub fn name(self) -> &'static str {
		match self {
			SectionKind::Type => "type",
			SectionKind::Import => "import",
			SectionKind::Function => "function",
			SectionKind::Memory => "memory",
			SectionKind::Export => "export",
			SectionKind::Code => "code",
		}
	}
}

/// Descriptor tag shared by import and export entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternKind {
	Func = 0x00,
	Table = 0x01,
	Mem = 0x02,
	Global = 0x03,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeIdx(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncIdx(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemIdx(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalIdx(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
	pub module: String,
	pub name: String,
	pub desc: ImportDesc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportDesc {
	Func(TypeIdx),
	Mem(MemType),
}
impl ImportDesc {
	pub fn kind(&self) -> ExternKind {
		match self {
			ImportDesc::Func(_) => ExternKind::Func,
			ImportDesc::Mem(_) => ExternKind::Mem,
		}
	}

	pub fn as_func(&self) -> Option<TypeIdx> {
		match self {
			ImportDesc::Func(typ) => Some(*typ),
			_ => None,
		}
	}

	pub fn as_mem(&self) -> Option<&MemType> {
		match self {
			ImportDesc::Mem(typ) => Some(typ),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Func {
	pub typ: TypeIdx,
	pub locals: Vec<ValType>,
	pub body: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
	pub typ: MemType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
	pub name: String,
	pub desc: ExportDesc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportDesc {
	Func(FuncIdx),
	Mem(MemIdx),
}
impl ExportDesc {
	pub fn kind(&self) -> ExternKind {
		match self {
			ExportDesc::Func(_) => ExternKind::Func,
			ExportDesc::Mem(_) => ExternKind::Mem,
		}
	}
}

/// A declarative module description. Function and memory index spaces start with the
/// imported entries, followed by the ones defined here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
	types: Vec<FuncType>,
	imports: Vec<Import>,
	funcs: Vec<Func>,
	mems: Vec<Mem>,
	exports: Vec<Export>,
}
impl Module {
	pub fn new(
		types: Vec<FuncType>,
		imports: Vec<Import>,
		funcs: Vec<Func>,
		mems: Vec<Mem>,
		exports: Vec<Export>,
	) -> Self {
		Self { types, imports, funcs, mems, exports }
	}

	pub fn types(&self) -> &Vec<FuncType> {
		&self.types
	}

	pub fn imports(&self) -> &Vec<Import> {
		&self.imports
	}

	pub fn funcs(&self) -> &Vec<Func> {
		&self.funcs
	}

	pub fn mems(&self) -> &Vec<Mem> {
		&self.mems
	}

	pub fn exports(&self) -> &Vec<Export> {
		&self.exports
	}

	pub fn imported_funcs(&self) -> usize {
		self.imports.iter().filter(|i| i.desc.as_func().is_some()).count()
	}

	pub fn imported_mems(&self) -> usize {
		self.imports.iter().filter(|i| i.desc.as_mem().is_some()).count()
	}

	pub fn validate(&self) -> Result<(), Error> {
		info!("validating...");
		validate_module(self)
	}

	/// Validates the description and encodes it, returning the bytes together with the
	/// total encoded length of every section produced.
	pub fn encode(&self) -> Result<Encoded, Error> {
		self.validate()?;
		info!("encoding...");
		Ok(module(self))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn section_ids_keep_their_gaps() {
		let ids: Vec<u8> = SectionKind::ALL.iter().map(|k| k.id()).collect();
		assert_eq!(ids, [1, 2, 3, 5, 7, 10]);
		assert_eq!(SectionKind::from_id(5), Some(SectionKind::Memory));
		assert_eq!(SectionKind::from_id(4), None);
		assert_eq!(SectionKind::from_id(0), None);
	}

	#[test]
	fn index_spaces_count_imports() {
		let module = Module::new(
			vec![FuncType::default()],
			vec![
				Import { module: "env".into(), name: "f".into(), desc: ImportDesc::Func(TypeIdx(0)) },
				Import { module: "env".into(), name: "m".into(), desc: ImportDesc::Mem(MemType::new(1, None)) },
			],
			vec![],
			vec![],
			vec![],
		);
		assert_eq!(module.imported_funcs(), 1);
		assert_eq!(module.imported_mems(), 1);
	}
}
