//! Encoding-tolerant JSON document loading.
//!
//! Schedule editors on Windows save profiles in whatever code page the
//! machine uses. Documents are tried against a fixed list of encodings:
//! - UTF-8 with an optional BOM
//! - GBK
//! - plain UTF-8
//!
//! The first encoding that both decodes cleanly and yields valid JSON for the
//! target type wins.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{GBK, UTF_8};
use serde::de::DeserializeOwned;

use crate::error::{TimetableError, TimetableResult};

/// UTF-8 BOM: EF BB BF
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A text encoding a document may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, BOM stripped if present
    Utf8Sig,
    /// Simplified Chinese legacy code page
    Gbk,
    /// UTF-8, BOM kept as content
    Utf8,
}

/// Order in which encodings are attempted.
pub const ENCODING_ORDER: [TextEncoding; 3] =
    [TextEncoding::Utf8Sig, TextEncoding::Gbk, TextEncoding::Utf8];

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8Sig => write!(f, "utf-8-sig"),
            TextEncoding::Gbk => write!(f, "gbk"),
            TextEncoding::Utf8 => write!(f, "utf-8"),
        }
    }
}

impl TextEncoding {
    /// Strictly decode `bytes`. Returns `None` on any malformed sequence.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Gbk => GBK.decode_without_bom_handling_and_without_replacement(bytes),
            TextEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
        }
    }
}

/// Read a JSON document from disk, trying each known encoding in turn.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> TimetableResult<T> {
    let bytes = std::fs::read(path).map_err(|e| {
        tracing::warn!("Failed to open {}: {}", path.display(), e);
        TimetableError::UnreadableDocument(path.to_path_buf())
    })?;

    let (value, encoding) = parse_json_bytes(&bytes, &path.display().to_string())
        .ok_or_else(|| TimetableError::UnreadableDocument(path.to_path_buf()))?;

    tracing::info!(
        "Successfully read and parsed {} with encoding {}",
        path.display(),
        encoding
    );
    Ok(value)
}

/// Decode and parse an in-memory document. `label` only feeds log messages.
pub fn parse_json_bytes<T: DeserializeOwned>(
    bytes: &[u8],
    label: &str,
) -> Option<(T, TextEncoding)> {
    for encoding in ENCODING_ORDER {
        let Some(text) = encoding.decode(bytes) else {
            tracing::warn!("Failed to read {} with encoding {}", label, encoding);
            continue;
        };

        match serde_json::from_str::<T>(&text) {
            Ok(value) => return Some((value, encoding)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse JSON in {} with encoding {}: {}",
                    label,
                    encoding,
                    e
                );
            }
        }
    }

    None
}
