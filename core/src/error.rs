use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("term id {id} out of range for lexicon of {len} entries")]
    IndexOutOfRange { id: usize, len: usize },

    #[error("term already present in lexicon: {0:?}")]
    DuplicateTerm(String),

    #[error("failed to decode lexicon archive: {0}")]
    Deserialize(String),

    #[error("failed to encode lexicon archive: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LexiconError>;
