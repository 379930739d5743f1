use crate::error::{LexiconError, Result};
use crate::lexicon::TermId;
use std::collections::BTreeMap;

/// Two-way term string <-> id table. Ids are positions in `id_term`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Vocab {
    id_term: Vec<String>,
    term_id: BTreeMap<String, TermId>,
}

impl Vocab {
    pub(crate) fn singleton(term: &str) -> Self {
        let mut term_id = BTreeMap::new();
        term_id.insert(term.to_string(), 0);
        Self { id_term: vec![term.to_string()], term_id }
    }

    /// Rebuilds the table from persisted halves, failing unless they agree entry for entry.
    pub(crate) fn from_parts(id_term: Vec<String>, term_id: BTreeMap<String, TermId>) -> Result<Self> {
        if id_term.len() != term_id.len() {
            return Err(LexiconError::Deserialize(format!(
                "id_term has {} entries but term_id has {}",
                id_term.len(),
                term_id.len()
            )));
        }
        for (id, term) in id_term.iter().enumerate() {
            match term_id.get(term) {
                Some(&mapped) if mapped == id => {}
                Some(&mapped) => {
                    return Err(LexiconError::Deserialize(format!(
                        "term {term:?} stored at id {id} but mapped to {mapped}"
                    )))
                }
                None => {
                    return Err(LexiconError::Deserialize(format!(
                        "term {term:?} at id {id} missing from term_id"
                    )))
                }
            }
        }
        Ok(Self { id_term, term_id })
    }

    /// Assigns the next id to `term`. Existing entries are never rebound.
    pub(crate) fn insert(&mut self, term: String) -> Result<TermId> {
        if self.term_id.contains_key(&term) {
            return Err(LexiconError::DuplicateTerm(term));
        }
        let id = self.id_term.len();
        self.term_id.insert(term.clone(), id);
        self.id_term.push(term);
        Ok(id)
    }

    pub(crate) fn id(&self, term: &str) -> Option<TermId> {
        self.term_id.get(term).copied()
    }

    pub(crate) fn term(&self, id: TermId) -> Result<&str> {
        self.id_term
            .get(id)
            .map(String::as_str)
            .ok_or(LexiconError::IndexOutOfRange { id, len: self.id_term.len() })
    }

    pub(crate) fn len(&self) -> usize { self.id_term.len() }

    pub(crate) fn id_term(&self) -> &[String] { &self.id_term }

    pub(crate) fn term_id(&self) -> &BTreeMap<String, TermId> { &self.term_id }
}
