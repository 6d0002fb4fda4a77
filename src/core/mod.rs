//! Core data types for guides, genomic loci, primers, and report rows.

pub mod guide;
pub mod locus;
pub mod primer;
pub mod report;
pub mod window;
