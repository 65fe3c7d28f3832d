#![no_std]

#[macro_use]
extern crate alloc;
#[macro_use]
extern crate log;

pub mod binary;
pub mod builder;
pub mod fixtures;
pub mod syntax;
pub mod valid;

mod error;

pub use binary::{
	modules::{Encoded, SectionSizes},
	sections::{parse_sections, SectionIndex, SectionName, SectionSpan},
};
pub use builder::ModuleBuilder;
pub use error::Error;
pub use syntax::modules::Module;
pub use valid::{validate, Finding, Oracle, OracleOutcome, Report, Unavailable};
