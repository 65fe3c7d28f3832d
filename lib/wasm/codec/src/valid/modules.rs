use crate::{
	syntax::{
		modules::{Export, ExportDesc, Func, Import, ImportDesc, Module},
		types::{Limits, MemType},
	},
	Error,
};
use hashbrown::HashSet;

/// Pages addressable by a 32-bit memory.
const MAX_PAGES: u32 = 65536;

fn validate_limits(limits: &Limits, range: u32) -> Result<(), Error> {
	if limits.min > range {
		return Err(Error::Invalid("limits: min > range"));
	}
	if let Some(max) = limits.max {
		if max > range {
			return Err(Error::Invalid("limits: max > range"));
		}
		if max < limits.min {
			return Err(Error::Invalid("limits: max < min"));
		}
	}
	Ok(())
}

fn validate_memtype(memtype: &MemType) -> Result<(), Error> {
	validate_limits(&memtype.lim, MAX_PAGES)
}

fn validate_import(module: &Module, import: &Import) -> Result<(), Error> {
	match &import.desc {
		ImportDesc::Func(typeidx) => {
			if typeidx.0 as usize >= module.types().len() {
				return Err(Error::Invalid("import: undefined type"));
			}
		},
		ImportDesc::Mem(memtype) => validate_memtype(memtype)?,
	}
	Ok(())
}

fn validate_func(module: &Module, func: &Func) -> Result<(), Error> {
	if func.typ.0 as usize >= module.types().len() {
		return Err(Error::Invalid("func: The type must be defined in the context."));
	}
	Ok(())
}

fn validate_export(module: &Module, export: &Export) -> Result<(), Error> {
	match export.desc {
		ExportDesc::Func(funcidx) => {
			if funcidx.0 as usize >= module.imported_funcs() + module.funcs().len() {
				return Err(Error::Invalid("export: undefined func"));
			}
		},
		ExportDesc::Mem(memidx) => {
			if memidx.0 as usize >= module.imported_mems() + module.mems().len() {
				return Err(Error::Invalid("export: undefined mem"));
			}
		},
	}
	Ok(())
}

/// Structural checks the encoder relies on; instruction bodies are not type-checked.
pub fn validate_module(module: &Module) -> Result<(), Error> {
	for import in module.imports() {
		validate_import(module, import)?;
	}
	for func in module.funcs() {
		validate_func(module, func)?;
	}
	for mem in module.mems() {
		validate_memtype(&mem.typ)?;
	}
	{
		let mut names = HashSet::new();
		for export in module.exports() {
			validate_export(module, export)?;
			if !names.insert(export.name.as_str()) {
				return Err(Error::Invalid("module: All export names must be different."));
			}
		}
	}

	if module.imported_mems() + module.mems().len() > 1 {
		return Err(Error::Invalid("module: The length of mems must not be larger than 1."));
	}

	Ok(())
}
