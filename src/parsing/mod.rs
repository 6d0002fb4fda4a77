//! Parsers for the guide input table.

pub mod guides;

pub use guides::{read_guides, read_guides_file, GuideTable, ParseError, RejectedRow};
