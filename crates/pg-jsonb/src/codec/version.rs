//! Version marker handling for the binary jsonb sub-format.
//!
//! Binary payloads are `[JSONB_VERSION] ++ document`. Text payloads carry
//! the bare document and never pass through here.

use crate::error::DecodeError;
use crate::limits::JSONB_VERSION;

/// Validates the leading version marker and returns the document after it.
pub fn strip_version(payload: &[u8]) -> Result<&[u8], DecodeError> {
    match payload.split_first() {
        None => Err(DecodeError::MissingVersion),
        Some((&JSONB_VERSION, document)) => Ok(document),
        Some((&version, _)) => Err(DecodeError::UnsupportedVersion { version }),
    }
}

/// Returns an empty buffer holding only the version marker, with room for
/// `capacity` document bytes after it.
pub fn versioned_buffer(capacity: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(capacity + 1);
    buf.push(JSONB_VERSION);
    buf
}

/// Prepends the version marker to a serialized document.
pub fn with_version(document: &[u8]) -> Vec<u8> {
    let mut buf = versioned_buffer(document.len());
    buf.extend_from_slice(document);
    buf
}
