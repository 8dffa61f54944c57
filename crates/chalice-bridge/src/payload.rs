//! Webview payload codec.
//!
//! The configuration webview returns its form state as percent-encoded JSON
//! (the page encodes with `encodeURIComponent` before closing).  Decoding
//! therefore follows `decodeURIComponent` semantics, not form encoding: a
//! `+` is a literal plus, and escapes decode to *bytes* that must assemble
//! into valid UTF-8.

use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

/// Percent-decode `input` into its original text.
///
/// Fails on a truncated or non-hex `%` escape and on decoded bytes that are
/// not valid UTF-8.  Multi-byte characters split across several `%XX`
/// escapes are reassembled correctly.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .ok_or(BridgeError::MalformedPercentEncoding { position: i })?;
                let hex = std::str::from_utf8(hex)
                    .map_err(|_| BridgeError::MalformedPercentEncoding { position: i })?;
                let byte = u8::from_str_radix(hex, 16)
                    .map_err(|_| BridgeError::MalformedPercentEncoding { position: i })?;
                out.push(byte);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8(out)?)
}

/// Percent-encode `input` the way `encodeURIComponent` does.
///
/// Leaves the unreserved set (`A-Z a-z 0-9 - _ . ~`) and the
/// `encodeURIComponent` extras (`! * ' ( )`) untouched; everything else
/// becomes `%XX` per UTF-8 byte.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 2);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'!' | b'*'
            | b'\'' | b'(' | b')' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

/// Decode a webview response into the configuration mapping.
///
/// The response must be percent-encoded JSON text whose top level is an
/// object; the returned map is exactly that object, with no validation of
/// its fields.
pub fn decode_response(response: &str) -> Result<Map<String, Value>> {
    let text = percent_decode(response)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        _ => Err(BridgeError::NotAnObject),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
