//! Encoding a [`Lexicon`] to caller-supplied streams.
//!
//! The binary archive is bincode's default encoding: fixed-width little-endian
//! integers, u64 length prefixes, fields in declaration order. JSON is offered
//! for inspection only.

use crate::error::{LexiconError, Result};
use crate::lexicon::Lexicon;
use bincode::Options;
use std::io::{Read, Write};

fn archive_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

pub fn to_bytes(lexicon: &Lexicon) -> Result<Vec<u8>> {
    let bytes = archive_options()
        .serialize(lexicon)
        .map_err(|e| LexiconError::Serialize(e.to_string()))?;
    tracing::debug!(bytes = bytes.len(), terms = lexicon.length(), "encoded lexicon");
    Ok(bytes)
}

/// Decodes a complete archive. Trailing bytes are rejected.
pub fn from_bytes(bytes: &[u8]) -> Result<Lexicon> {
    let lexicon: Lexicon = archive_options().deserialize(bytes).map_err(decode_error)?;
    tracing::debug!(bytes = bytes.len(), terms = lexicon.length(), "decoded lexicon");
    Ok(lexicon)
}

pub fn write_lexicon<W: Write>(writer: &mut W, lexicon: &Lexicon) -> Result<()> {
    let bytes = to_bytes(lexicon)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

pub fn read_lexicon<R: Read>(reader: &mut R) -> Result<Lexicon> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_bytes(&buf)
}

pub fn write_lexicon_json<W: Write>(writer: &mut W, lexicon: &Lexicon) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, lexicon).map_err(|e| LexiconError::Serialize(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

pub fn read_lexicon_json<R: Read>(reader: &mut R) -> Result<Lexicon> {
    let lexicon: Lexicon = serde_json::from_reader(reader).map_err(|e| {
        tracing::warn!(%e, "rejected lexicon json");
        LexiconError::Deserialize(e.to_string())
    })?;
    tracing::debug!(terms = lexicon.length(), "decoded lexicon json");
    Ok(lexicon)
}

fn decode_error(e: bincode::Error) -> LexiconError {
    tracing::warn!(%e, "rejected lexicon archive");
    LexiconError::Deserialize(e.to_string())
}
