use crate::{
	binary::{values::decode_unsigned, HEADER_LEN, MAGIC, VERSION},
	syntax::modules::SectionKind,
	Error,
};
use alloc::{string::ToString, vec::Vec};
use core::{convert::TryFrom, fmt};
use nom::{bytes::complete::tag, IResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionName {
	/// The magic number and version.
	Header,
	Known(SectionKind),
	Unknown(u8),
}
impl SectionName {
	pub fn from_id(id: u8) -> Self {
		match SectionKind::from_id(id) {
			Some(kind) => SectionName::Known(kind),
			None => SectionName::Unknown(id),
		}
	}

	pub fn matches(&self, name: &str) -> bool {
		match self {
			SectionName::Header => name == "header",
			SectionName::Known(kind) => name == kind.name(),
			SectionName::Unknown(_) => name == self.to_string(),
		}
	}
}
impl fmt::Display for SectionName {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			SectionName::Header => f.write_str("header"),
			SectionName::Known(kind) => f.write_str(kind.name()),
			SectionName::Unknown(id) => write!(f, "unknown_{}", id),
		}
	}
}

/// Where a section starts and how many bytes it occupies, id byte and length prefix
/// included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpan {
	pub name: SectionName,
	pub offset: usize,
	pub len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionIndex {
	spans: Vec<SectionSpan>,
}
impl SectionIndex {
	pub fn spans(&self) -> &[SectionSpan] {
		&self.spans
	}

	/// The last span recorded under `name`; a repeated section id shadows earlier ones.
	pub fn get(&self, name: &str) -> Option<&SectionSpan> {
		self.spans.iter().rev().find(|span| span.name.matches(name))
	}

	pub fn total(&self) -> usize {
		self.spans.iter().map(|span| span.len).sum()
	}
}

fn magic(i: &[u8]) -> IResult<&[u8], &[u8]> {
	tag(&MAGIC[..])(i)
}

fn version(i: &[u8]) -> IResult<&[u8], &[u8]> {
	tag(&VERSION[..])(i)
}

/// Walks the section headers of a binary module without looking inside payloads.
pub fn parse_sections(bytes: &[u8]) -> Result<SectionIndex, Error> {
	info!("parsing sections...");
	let (i, _) = magic(bytes).map_err(|_| Error::InvalidMagic { found: prefix(bytes) })?;
	version(i).map_err(|_| Error::UnsupportedVersion { found: prefix(i) })?;

	let mut spans = vec![SectionSpan { name: SectionName::Header, offset: 0, len: HEADER_LEN }];
	let mut pos = HEADER_LEN;
	while pos < bytes.len() {
		let name = SectionName::from_id(bytes[pos]);
		let (size, prefix_len) = decode_unsigned(bytes, pos + 1)?;
		let declared = usize::try_from(size).unwrap_or(usize::MAX).saturating_add(1 + prefix_len);
		let available = bytes.len() - pos;
		if declared > available {
			return Err(Error::TruncatedModule { offset: pos, declared, available });
		}
		trace!("{} @{:#x}: {} bytes", name, pos, declared);
		spans.push(SectionSpan { name, offset: pos, len: declared });
		pos += declared;
	}

	Ok(SectionIndex { spans })
}

fn prefix(bytes: &[u8]) -> Vec<u8> {
	bytes[..bytes.len().min(4)].to_vec()
}
