//! Text-safe byte transform
//!
//! Stores only hold text, so every binary payload is passed through one fixed
//! transform before it is written and reversed after it is read: base-64,
//! standard alphabet, padded.
//!
//! Both binary strategies call [`to_text`] and [`from_text`] and nothing
//! else, which keeps the write and read paths on the same alphabet.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use kvcodec_core::{CodecError, CodecResult};

/// Identifier reported in transform errors
pub const TRANSFORM_ID: &str = "base64";

/// Encode bytes as text
pub fn to_text(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode text produced by [`to_text`]
///
/// # Errors
///
/// Returns `MalformedEncoding` if the text is not valid padded standard
/// base-64.
pub fn from_text(text: &str) -> CodecResult<Vec<u8>> {
    BASE64
        .decode(text.trim_end())
        .map_err(|e| CodecError::malformed(TRANSFORM_ID, format!("invalid base64: {}", e)))
}
