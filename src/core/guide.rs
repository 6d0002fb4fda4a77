use serde::{Deserialize, Serialize};

/// A single guide RNA from the input table.
///
/// The sequence is the DNA representation of the guide's protospacer, the
/// short region the guide directs Cas to. It is what gets aligned against
/// the genome to find the cut site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRecord {
    /// User-supplied guide name (`guide_name` column)
    #[serde(rename = "guide_name")]
    pub name: String,

    /// Guide sequence in DNA alphabet (`guide_seq` column)
    #[serde(rename = "guide_seq")]
    pub sequence: String,
}

impl GuideRecord {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    /// Guide length in bases. A BLAT hit must match all of them to count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_len() {
        let guide = GuideRecord::new("g1", "ACGTACGTACGTACGTACGT");
        assert_eq!(guide.len(), 20);
        assert!(!guide.is_empty());
    }
}
