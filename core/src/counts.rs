use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type FieldId = u64;

/// Occurrence statistics: documents containing an item and its total occurrences.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counts {
    pub document_count: u64,
    pub term_count: u64,
}

impl Counts {
    pub fn new(document_count: u64, term_count: u64) -> Self {
        Self { document_count, term_count }
    }
}

/// Per-field statistics. Ordered by field id so archives are byte-stable.
pub type FieldCounts = BTreeMap<FieldId, Counts>;
