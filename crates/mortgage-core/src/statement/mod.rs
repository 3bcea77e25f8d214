//! Mortgage statement field extraction.

mod assembler;
pub mod rules;

pub use assembler::{RecordAssembler, normalize};
pub use rules::{ExtractionMatch, FieldExtractor};
