use crate::{
	binary::{
		modules::SectionSizes,
		sections::SectionIndex,
		values::{decode_unsigned, sleb128, uleb128},
		MAGIC, VERSION,
	},
	valid::{Check, Finding, Observed},
};
use alloc::{string::ToString, vec::Vec};
use core::convert::TryFrom;
use hashbrown::HashSet;

const ULEB128_VECTORS: [(u64, &[u8]); 7] = [
	(0, &[0x00]),
	(1, &[0x01]),
	(127, &[0x7F]),
	(128, &[0x80, 0x01]),
	(255, &[0xFF, 0x01]),
	(256, &[0x80, 0x02]),
	(16384, &[0x80, 0x80, 0x01]),
];

const SLEB128_VECTORS: [(i64, &[u8]); 8] = [
	(0, &[0x00]),
	(1, &[0x01]),
	(63, &[0x3F]),
	(64, &[0xC0, 0x00]),
	(127, &[0xFF, 0x00]),
	(-1, &[0x7F]),
	(-64, &[0x40]),
	(-65, &[0xBF, 0x7F]),
];

/// Encodes the reference vectors and compares them with their known encodings.
pub fn check_leb128() -> Vec<Finding> {
	let unsigned = ULEB128_VECTORS.iter().map(|(value, expected)| Finding {
		check: Check::Leb128,
		subject: format!("uleb128({})", value),
		offset: None,
		expected: Observed::Bytes(expected.to_vec()),
		actual: Observed::Bytes(uleb128(*value)),
	});
	let signed = SLEB128_VECTORS.iter().map(|(value, expected)| Finding {
		check: Check::Leb128,
		subject: format!("sleb128({})", value),
		offset: None,
		expected: Observed::Bytes(expected.to_vec()),
		actual: Observed::Bytes(sleb128(*value)),
	});
	unsigned.chain(signed).collect()
}

/// Builder-tracked section lengths against the parsed ones, plus the total. Sections
/// the parser found but the builder never reported are flagged too.
pub fn check_sizes(sizes: &SectionSizes, index: &SectionIndex, actual_len: usize) -> Vec<Finding> {
	let mut findings: Vec<Finding> = sizes
		.iter()
		.map(|(name, len)| {
			let span = index.get(name);
			Finding {
				check: Check::SectionSize,
				subject: name.to_string(),
				offset: span.map(|s| s.offset),
				expected: Observed::Len(len),
				actual: Observed::Len(span.map_or(0, |s| s.len)),
			}
		})
		.collect();

	let built: HashSet<&str> = sizes.iter().map(|(name, _)| name).collect();
	for span in index.spans() {
		let name = span.name.to_string();
		if !built.contains(name.as_str()) {
			findings.push(Finding {
				check: Check::SectionSize,
				subject: name,
				offset: Some(span.offset),
				expected: Observed::Len(0),
				actual: Observed::Len(span.len),
			});
		}
	}

	findings.push(Finding {
		check: Check::TotalSize,
		subject: "total".to_string(),
		offset: None,
		expected: Observed::Len(actual_len),
		actual: Observed::Len(sizes.total()),
	});
	findings
}

/// Offset and declared length of the first function body, found by stepping over the
/// code section's id, length, and body count. `None` when the code section is missing,
/// holds no bodies, or its first body does not fit inside the section.
pub fn code_body(bytes: &[u8], index: &SectionIndex) -> Option<(usize, usize)> {
	let code = index.get("code")?;
	let section = bytes.get(..code.offset + code.len)?;
	let mut pos = code.offset + 1;
	let (_, len_bytes) = decode_unsigned(section, pos).ok()?;
	pos += len_bytes;
	let (count, count_bytes) = decode_unsigned(section, pos).ok()?;
	if count == 0 {
		return None;
	}
	pos += count_bytes;
	let (body_len, body_len_bytes) = decode_unsigned(section, pos).ok()?;
	pos += body_len_bytes;
	let body_len = usize::try_from(body_len).ok()?;
	if body_len > section.len() - pos {
		return None;
	}
	Some((pos, body_len))
}

/// Magic and version at their fixed offsets, and the first code body against
/// `expected_body`.
pub fn check_bytes(bytes: &[u8], index: &SectionIndex, expected_body: &[u8]) -> Vec<Finding> {
	let body = code_body(bytes, index);
	let checks: [(&str, Option<(usize, usize)>, &[u8]); 3] = [
		("magic", Some((0, MAGIC.len())), &MAGIC),
		("version", Some((MAGIC.len(), VERSION.len())), &VERSION),
		("code body", body, expected_body),
	];

	checks
		.iter()
		.map(|(subject, at, expected)| Finding {
			check: Check::Bytes,
			subject: subject.to_string(),
			offset: at.map(|(offset, _)| offset),
			expected: Observed::Bytes(expected.to_vec()),
			actual: Observed::Bytes(at.map_or_else(Vec::new, |(offset, len)| slice_at(bytes, offset, len))),
		})
		.collect()
}

fn slice_at(bytes: &[u8], offset: usize, len: usize) -> Vec<u8> {
	match bytes.get(offset..) {
		Some(rest) => rest[..len.min(rest.len())].to_vec(),
		None => vec![],
	}
}
