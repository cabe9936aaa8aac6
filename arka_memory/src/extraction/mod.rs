//! Rule-based memory block extraction.
//!
//! A fixed catalog of categories, each with a trigger vocabulary, is matched
//! against free text. Each category that fires gets its structured fields
//! parsed, scored, tagged and hashed into a [`arka_core::MemoryBlock`].

pub mod catalog;
pub mod detector;
pub mod engine;
pub mod fields;
pub mod text;

pub use catalog::{PATTERN_CATALOG, PatternSpec, default_catalog, pattern_for};
pub use detector::{Detection, detect};
pub use engine::{ExtractionEngine, extract_memory_blocks};
pub use fields::{FieldExtractor, FieldInput, extract_fields, extractor_for};
