//! The byte-level grammar: LEB128 values, type and instruction encodings, module
//! assembly, and the section walker used to re-derive boundaries from raw bytes.

pub mod instructions;
pub mod modules;
pub mod sections;
pub mod types;
pub mod values;

/// `\0asm`
pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];
pub const HEADER_LEN: usize = MAGIC.len() + VERSION.len();
