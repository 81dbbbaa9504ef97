// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! Text codec for `tw_blob.blobdata`.
//!
//! Store writes every source string, definition and comment as base64 with
//! classic Mac line endings (`\r`). Reading reverses both.

use data_encoding::BASE64;

use crate::error::{Error, Result};

/// Decode a Store blob payload into text with `\n` line endings.
///
/// `blob_id` is only used for error reporting.
pub fn decode_blob(blob_id: i64, data: &str) -> Result<String> {
    let compact: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = BASE64
        .decode(&compact)
        .map_err(|source| Error::BlobDecode { blob_id, source })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // VisualWorks images default to ISO-8859-1
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    };
    Ok(normalize_line_endings(&text))
}

/// Encode text the way Store stores it: `\r` line endings, then base64.
pub fn encode_blob(text: &str) -> String {
    let stored = normalize_line_endings(text).replace('\n', "\r");
    BASE64.encode(stored.as_bytes())
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
