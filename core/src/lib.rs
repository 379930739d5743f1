pub mod counts;
pub mod error;
pub mod lexicon;
pub mod persist;
pub mod term;
mod vocab;

pub use counts::{Counts, FieldCounts, FieldId};
pub use error::{LexiconError, Result};
pub use lexicon::{Lexicon, TermId, OOV_ID, OOV_TERM};
pub use term::Term;
