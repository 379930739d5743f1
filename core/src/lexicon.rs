use crate::counts::{Counts, FieldCounts};
use crate::error::{LexiconError, Result};
use crate::term::Term;
use crate::vocab::Vocab;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Index;

pub type TermId = usize;

/// Id reserved for terms missing from the lexicon.
pub const OOV_ID: TermId = 0;
/// String stored at [`OOV_ID`] by [`Lexicon::new`].
pub const OOV_TERM: &str = "xxoov";

/// Append-only table mapping term strings to dense ids, each id carrying
/// collection-wide and per-field statistics.
///
/// A lexicon built with [`Lexicon::new`] always holds the OOV sentinel at id 0.
/// [`Lexicon::default`] is empty and only meant to be replaced by a decoded archive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lexicon {
    counts: Counts,
    terms: Vec<Term>,
    vocab: Vocab,
}

impl Lexicon {
    pub fn new(counts: Counts) -> Self {
        Self { counts, terms: vec![Term::default()], vocab: Vocab::singleton(OOV_TERM) }
    }

    pub fn counts(&self) -> Counts { self.counts }

    /// Number of documents in the collection.
    pub fn document_count(&self) -> u64 { self.counts.document_count }

    /// Number of term occurrences in the collection.
    pub fn term_count(&self) -> u64 { self.counts.term_count }

    /// Number of unique terms, not counting the OOV slot.
    pub fn length(&self) -> u64 {
        self.terms.len().saturating_sub(1) as u64
    }

    pub fn is_empty(&self) -> bool { self.length() == 0 }

    /// Statistics stored at `id`.
    pub fn get(&self, id: TermId) -> Result<&Term> {
        self.terms
            .get(id)
            .ok_or(LexiconError::IndexOutOfRange { id, len: self.terms.len() })
    }

    /// Id of `term`, or [`OOV_ID`] when it was never added.
    pub fn term_id(&self, term: &str) -> TermId {
        self.vocab.id(term).unwrap_or(OOV_ID)
    }

    /// String stored at `id`.
    pub fn term_str(&self, id: TermId) -> Result<&str> {
        self.vocab.term(id)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocab.id(term).is_some()
    }

    pub fn oov_term(&self) -> TermId { OOV_ID }

    pub fn is_oov(&self, id: TermId) -> bool { id == OOV_ID }

    /// Appends `term` at the next free id and returns that id.
    ///
    /// A term string that is already present is rejected with
    /// [`LexiconError::DuplicateTerm`] and the lexicon is left unchanged.
    pub fn push_back(
        &mut self,
        term: impl Into<String>,
        counts: Counts,
        field_counts: FieldCounts,
    ) -> Result<TermId> {
        let term = term.into();
        let id = match self.vocab.insert(term) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, "rejected term");
                return Err(err);
            }
        };
        debug_assert_eq!(self.vocab.len(), self.terms.len() + 1);
        self.terms.push(Term::new(counts, field_counts));
        tracing::trace!(
            id,
            document_count = counts.document_count,
            term_count = counts.term_count,
            "appended term"
        );
        Ok(id)
    }

    /// Entries in id order, the OOV slot included.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str, &Term)> + '_ {
        self.vocab
            .id_term()
            .iter()
            .zip(self.terms.iter())
            .enumerate()
            .map(|(id, (s, t))| (id, s.as_str(), t))
    }
}

impl Index<TermId> for Lexicon {
    type Output = Term;

    /// Panics when `id` is out of range; use [`Lexicon::get`] for a checked lookup.
    fn index(&self, id: TermId) -> &Term {
        match self.get(id) {
            Ok(term) => term,
            Err(err) => panic!("{err}"),
        }
    }
}

// Archive layout: (counts, terms, id_term, term_id). term_id is redundant with
// id_term but kept for format compatibility and cross-checked on load.
#[derive(Serialize)]
struct ArchiveRef<'a> {
    counts: &'a Counts,
    terms: &'a [Term],
    id_term: &'a [String],
    term_id: &'a BTreeMap<String, TermId>,
}

#[derive(Deserialize)]
struct Archive {
    counts: Counts,
    terms: Vec<Term>,
    id_term: Vec<String>,
    term_id: BTreeMap<String, TermId>,
}

impl TryFrom<Archive> for Lexicon {
    type Error = LexiconError;

    fn try_from(archive: Archive) -> Result<Self> {
        if archive.terms.len() != archive.id_term.len() {
            return Err(LexiconError::Deserialize(format!(
                "{} terms but {} term strings",
                archive.terms.len(),
                archive.id_term.len()
            )));
        }
        let vocab = Vocab::from_parts(archive.id_term, archive.term_id)?;
        Ok(Self { counts: archive.counts, terms: archive.terms, vocab })
    }
}

impl Serialize for Lexicon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ArchiveRef {
            counts: &self.counts,
            terms: &self.terms,
            id_term: self.vocab.id_term(),
            term_id: self.vocab.term_id(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Lexicon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let archive = Archive::deserialize(deserializer)?;
        Lexicon::try_from(archive).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(entries: &[(u64, u64, u64)]) -> FieldCounts {
        entries.iter().map(|&(f, dc, tc)| (f, Counts::new(dc, tc))).collect()
    }

    #[test]
    fn new_reserves_oov() {
        let lex = Lexicon::new(Counts::new(100, 500));
        assert_eq!(lex.length(), 0);
        assert!(lex.is_empty());
        assert_eq!(lex.term_str(OOV_ID).unwrap(), OOV_TERM);
        assert_eq!(lex.term_id(OOV_TERM), OOV_ID);
        assert_eq!(lex[OOV_ID], Term::default());
        assert_eq!(lex.document_count(), 100);
        assert_eq!(lex.term_count(), 500);
    }

    #[test]
    fn default_is_empty() {
        let lex = Lexicon::default();
        assert_eq!(lex.length(), 0);
        assert_eq!(lex.document_count(), 0);
        assert!(matches!(lex.get(0), Err(LexiconError::IndexOutOfRange { id: 0, len: 0 })));
        assert!(lex.term_str(0).is_err());
        assert_eq!(lex.term_id("anything"), OOV_ID);
    }

    #[test]
    fn push_back_assigns_ids_in_order() {
        let mut lex = Lexicon::new(Counts::new(100, 500));
        let dog = lex.push_back("dog", Counts::new(10, 20), fields(&[(1, 5, 10)])).unwrap();
        let cat = lex.push_back("cat", Counts::new(8, 15), FieldCounts::new()).unwrap();
        assert_eq!((dog, cat), (1, 2));
        assert_eq!(lex.length(), 2);
        assert_eq!(lex.term_id("dog"), 1);
        assert_eq!(lex.term_id("cat"), 2);
        assert_eq!(lex.term_id("bird"), OOV_ID);
        assert!(lex.is_oov(lex.term_id("bird")));
        assert_eq!(lex[1].field_document_count(1), 5);
        assert_eq!(lex[1].field_document_count(99), 0);
        assert_eq!(lex[2].term_count(), 15);
    }

    #[test]
    fn duplicate_push_is_rejected() {
        let mut lex = Lexicon::new(Counts::default());
        lex.push_back("dog", Counts::new(1, 1), FieldCounts::new()).unwrap();
        let before = lex.clone();
        let err = lex.push_back("dog", Counts::new(9, 9), FieldCounts::new()).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateTerm(ref t) if t == "dog"));
        assert_eq!(lex, before);

        let err = lex.push_back(OOV_TERM, Counts::default(), FieldCounts::new()).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateTerm(_)));
    }

    #[test]
    fn out_of_range_access() {
        let mut lex = Lexicon::new(Counts::default());
        lex.push_back("dog", Counts::new(1, 1), FieldCounts::new()).unwrap();
        assert!(matches!(lex.get(2), Err(LexiconError::IndexOutOfRange { id: 2, len: 2 })));
        assert!(matches!(lex.term_str(5), Err(LexiconError::IndexOutOfRange { id: 5, len: 2 })));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_out_of_range() {
        let lex = Lexicon::new(Counts::default());
        let _ = &lex[1];
    }

    #[test]
    fn iter_walks_ids_in_order() {
        let mut lex = Lexicon::new(Counts::default());
        lex.push_back("b", Counts::new(1, 2), FieldCounts::new()).unwrap();
        lex.push_back("a", Counts::new(3, 4), FieldCounts::new()).unwrap();
        let seen: Vec<(TermId, &str, u64)> = lex.iter().map(|(id, s, t)| (id, s, t.term_count())).collect();
        assert_eq!(seen, vec![(0, OOV_TERM, 0), (1, "b", 2), (2, "a", 4)]);
        assert!(lex.contains("a"));
        assert!(!lex.contains("c"));
    }
}
