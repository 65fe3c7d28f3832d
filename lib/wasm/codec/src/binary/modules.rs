use crate::{
	binary::{
		instructions::expr,
		types::{functype, memtype},
		values::{encode_name, encode_vec, encode_vec_byte, uleb128},
		HEADER_LEN, MAGIC, VERSION,
	},
	syntax::{
		modules::{Export, ExportDesc, Func, Import, ImportDesc, Mem, Module, SectionKind},
		types::{FuncType, ValType},
	},
};
use alloc::vec::Vec;

/// A section id together with its already-encoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
	pub kind: SectionKind,
	pub payload: Vec<u8>,
}
impl Section {
	/// Id byte, length prefix and payload.
	pub fn encoded_len(&self) -> usize {
		1 + uleb128(self.payload.len() as u64).len() + self.payload.len()
	}

	pub fn encode(&self) -> Vec<u8> {
		let mut out = vec![self.kind.id()];
		out.extend(encode_vec_byte(&self.payload));
		out
	}
}

pub fn section(kind: SectionKind, payload: Vec<u8>) -> Section {
	Section { kind, payload }
}

/// Total encoded length of every section a module was built from, in emission order.
/// The first entry is always the 8-byte header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionSizes(Vec<(&'static str, usize)>);
impl SectionSizes {
	fn record(&mut self, name: &'static str, len: usize) {
		self.0.push((name, len));
	}

	pub fn get(&self, name: &str) -> Option<usize> {
		self.0.iter().find(|(n, _)| *n == name).map(|(_, len)| *len)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
		self.0.iter().copied()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn total(&self) -> usize {
		self.0.iter().map(|(_, len)| len).sum()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
	pub bytes: Vec<u8>,
	pub sizes: SectionSizes,
}

fn typesec(types: &[FuncType]) -> Option<Section> {
	if types.is_empty() {
		return None;
	}
	let types: Vec<Vec<u8>> = types.iter().map(functype).collect();
	Some(section(SectionKind::Type, encode_vec(&types)))
}

fn importsec(imports: &[Import]) -> Option<Section> {
	if imports.is_empty() {
		return None;
	}
	let imports: Vec<Vec<u8>> = imports.iter().map(import).collect();
	Some(section(SectionKind::Import, encode_vec(&imports)))
}

fn import(import: &Import) -> Vec<u8> {
	let mut out = encode_name(&import.module);
	out.extend(encode_name(&import.name));
	out.push(import.desc.kind() as u8);
	match &import.desc {
		ImportDesc::Func(typ) => out.extend(uleb128(typ.0 as u64)),
		ImportDesc::Mem(typ) => out.extend(memtype(typ)),
	}
	out
}

fn funcsec(funcs: &[Func]) -> Option<Section> {
	if funcs.is_empty() {
		return None;
	}
	let typeidxs: Vec<Vec<u8>> = funcs.iter().map(|f| uleb128(f.typ.0 as u64)).collect();
	Some(section(SectionKind::Function, encode_vec(&typeidxs)))
}

fn memsec(mems: &[Mem]) -> Option<Section> {
	if mems.is_empty() {
		return None;
	}
	let mems: Vec<Vec<u8>> = mems.iter().map(|m| memtype(&m.typ)).collect();
	Some(section(SectionKind::Memory, encode_vec(&mems)))
}

fn exportsec(exports: &[Export]) -> Option<Section> {
	if exports.is_empty() {
		return None;
	}
	let exports: Vec<Vec<u8>> = exports.iter().map(export).collect();
	Some(section(SectionKind::Export, encode_vec(&exports)))
}

fn export(export: &Export) -> Vec<u8> {
	let mut out = encode_name(&export.name);
	out.push(export.desc.kind() as u8);
	let idx = match export.desc {
		ExportDesc::Func(idx) => idx.0,
		ExportDesc::Mem(idx) => idx.0,
	};
	out.extend(uleb128(idx as u64));
	out
}

fn codesec(funcs: &[Func]) -> Option<Section> {
	if funcs.is_empty() {
		return None;
	}
	let codes: Vec<Vec<u8>> = funcs.iter().map(code).collect();
	Some(section(SectionKind::Code, encode_vec(&codes)))
}

/// A code entry: the function body prefixed with its byte length.
pub fn code(func: &Func) -> Vec<u8> {
	encode_vec_byte(&func_body(func))
}

/// Local declarations followed by the expression. Runs of equal local types share one
/// `(count, type)` entry.
pub fn func_body(func: &Func) -> Vec<u8> {
	let mut out = encode_vec(&locals(&func.locals));
	out.extend(expr(&func.body));
	out
}

fn locals(locals: &[ValType]) -> Vec<Vec<u8>> {
	let mut groups: Vec<(u32, ValType)> = vec![];
	for typ in locals {
		match groups.last_mut() {
			Some((count, last)) if *last == *typ => *count += 1,
			_ => groups.push((1, *typ)),
		}
	}
	groups
		.into_iter()
		.map(|(count, typ)| {
			let mut out = uleb128(count as u64);
			out.push(typ as u8);
			out
		})
		.collect()
}

pub fn module(module: &Module) -> Encoded {
	let mut bytes = Vec::with_capacity(HEADER_LEN);
	bytes.extend_from_slice(&MAGIC);
	bytes.extend_from_slice(&VERSION);
	let mut sizes = SectionSizes::default();
	sizes.record("header", HEADER_LEN);

	let sections = [
		typesec(module.types()),
		importsec(module.imports()),
		funcsec(module.funcs()),
		memsec(module.mems()),
		exportsec(module.exports()),
		codesec(module.funcs()),
	];
	for section in sections.iter().flatten() {
		let encoded = section.encode();
		debug_assert_eq!(encoded.len(), section.encoded_len());
		debug!("{} section: {} bytes", section.kind.name(), encoded.len());
		sizes.record(section.kind.name(), encoded.len());
		bytes.extend(encoded);
	}

	Encoded { bytes, sizes }
}
