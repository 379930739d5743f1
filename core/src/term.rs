use crate::counts::{Counts, FieldCounts, FieldId};
use serde::{Deserialize, Serialize};

/// Statistics for one vocabulary entry, whole-document and per field.
///
/// Consumers expect each field's counts to be bounded by the whole-document
/// counts; this is not checked here.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    counts: Counts,
    field_counts: FieldCounts,
}

impl Term {
    pub fn new(counts: Counts, field_counts: FieldCounts) -> Self {
        Self { counts, field_counts }
    }

    pub fn counts(&self) -> Counts { self.counts }

    pub fn field_counts(&self) -> &FieldCounts { &self.field_counts }

    pub fn document_count(&self) -> u64 { self.counts.document_count }

    pub fn term_count(&self) -> u64 { self.counts.term_count }

    /// Documents in which the term occurs inside `field`; 0 when nothing was recorded.
    pub fn field_document_count(&self, field: FieldId) -> u64 {
        self.field_counts.get(&field).map_or(0, |c| c.document_count)
    }

    /// Occurrences of the term inside `field`; 0 when nothing was recorded.
    pub fn field_term_count(&self, field: FieldId) -> u64 {
        self.field_counts.get(&field).map_or(0, |c| c.term_count)
    }
}
