use std::borrow::Cow;
use std::char::{self, REPLACEMENT_CHARACTER};
use std::ffi::{OsStr, OsString};
use std::str;

use crate::error::{Encoding, EncodingError};

/// How malformed text is treated when converting it to or from a path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EncodingPolicy {
    /// Fail with an [`EncodingError`] at the first malformed sequence.
    #[default]
    Strict,
    /// Substitute U+FFFD for every malformed sequence and carry on.
    Lenient,
}

pub fn decode_utf8(bytes: &[u8], policy: EncodingPolicy) -> Result<Cow<'_, str>, EncodingError> {
    match str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(e) => match policy {
            EncodingPolicy::Strict => Err(EncodingError {
                encoding: Encoding::Utf8,
                offset: e.valid_up_to(),
            }),
            EncodingPolicy::Lenient => Ok(String::from_utf8_lossy(bytes)),
        },
    }
}

pub fn decode_utf16(units: &[u16], policy: EncodingPolicy) -> Result<String, EncodingError> {
    let mut text = String::with_capacity(units.len());
    let mut offset = 0;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match (decoded, policy) {
            (Ok(ch), _) => {
                text.push(ch);
                offset += ch.len_utf16();
            },
            (Err(_), EncodingPolicy::Strict) => Err(EncodingError {
                encoding: Encoding::Utf16,
                offset,
            })?,
            (Err(_), EncodingPolicy::Lenient) => {
                text.push(REPLACEMENT_CHARACTER);
                offset += 1;
            },
        }
    }

    Ok(text)
}

pub fn encode_utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Converts validated text to the platform's native representation. Infallible, as every platform
/// can represent all of Unicode.
pub fn text_to_native(text: &str) -> OsString {
    OsString::from(text)
}

/// Converts a native string to text. On Unix the bytes are interpreted as UTF-8; elsewhere the
/// encoded form is WTF-8, so unpaired surrogates show up as malformed sequences.
pub fn native_to_text(native: &OsStr, policy: EncodingPolicy) -> Result<Cow<'_, str>, EncodingError> {
    decode_utf8(native.as_encoded_bytes(), policy)
}
