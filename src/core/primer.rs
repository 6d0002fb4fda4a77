use serde::{Deserialize, Serialize};

/// One oligo of a primer pair, as reported by the design engine.
///
/// `start` and `length` are 0-based offsets within the template the engine
/// was given. For the left primer, `start` is its first base; for the right
/// primer it is the 5' base on the reverse strand, i.e. the highest template
/// index the primer covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primer {
    /// Primer sequence, 5' to 3'
    pub sequence: String,

    /// 0-based position within the design template
    pub start: usize,

    /// Primer length as reported by the engine
    pub length: usize,

    /// GC content percentage
    pub gc_percent: f64,
}

/// The top-ranked forward/reverse primer pair for one guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimerPair {
    pub left: Primer,
    pub right: Primer,
}

/// Allowed PCR product length range, in bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSizeRange {
    pub min: u32,
    pub max: u32,
}

impl ProductSizeRange {
    pub const DEFAULT: Self = Self { min: 150, max: 250 };
}

impl Default for ProductSizeRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ProductSizeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Everything a primer design engine needs for one guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignTask<'a> {
    /// Identifier passed through to the engine (the guide name)
    pub id: &'a str,

    /// Template sequence to design against (the flanking window)
    pub template: &'a str,

    /// 0-based start of the region the product must contain
    pub target_offset: usize,

    /// Length of the target region (the guide length)
    pub target_len: usize,

    /// Product size constraint
    pub product_size: ProductSizeRange,
}
