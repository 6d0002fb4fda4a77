use serde::Serialize;

/// One output row per successfully processed guide.
///
/// Field names double as the CSV column headers, in this exact order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignRow {
    pub guide_rna_name: String,
    pub guide_rna_seq: String,
    pub guide_rna_coords: String,
    pub strand: String,
    pub primer_left_seq: String,
    pub primer_left_coords: String,
    pub primer_left_gc: f64,
    pub primer_right_seq: String,
    pub primer_right_coords: String,
    pub primer_right_gc: f64,
    pub amplicon_seq: String,
}

/// A guide the batch could not complete, with the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideFailure {
    /// Guide name, or the input line for rows rejected before a name existed
    pub guide: String,

    /// Processing stage that failed (`parse`, `locate`, ...)
    pub stage: &'static str,

    /// Human-readable failure reason
    pub reason: String,
}

/// Outcome of a whole batch: the output table plus per-guide failures.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub rows: Vec<DesignRow>,
    pub failures: Vec<GuideFailure>,
}

impl RunReport {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
