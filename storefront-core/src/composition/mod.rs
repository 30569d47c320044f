//! Page composition built by the pattern assembler.
//!
//! A composition is an optional header, an ordered list of section patterns
//! and an optional footer. The preview addresses these through a flattened
//! sequence `[header?, ...sections, footer?]`; section indices used by the
//! mutation methods never include the header.

pub mod manager;

pub use manager::{Composition, CompositionSummary, encode_pattern_id};
