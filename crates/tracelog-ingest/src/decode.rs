//! Byte-level decoding of uploaded logs.

use encoding_rs::SHIFT_JIS;
use tracing::debug;

use crate::error::{LoadError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode upload bytes into text.
///
/// UTF-8 (with or without BOM) is taken as-is. Anything else is tried as
/// Shift_JIS, the usual export encoding of Japanese Windows test stations.
/// UTF-16 is rejected.
pub fn decode_input(source_name: &str, bytes: &[u8]) -> Result<String> {
    // Check for UTF-16 BOM (not supported)
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(LoadError::UnsupportedEncoding {
                source_name: source_name.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(LoadError::UnsupportedEncoding {
                source_name: source_name.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Ok(text.to_string());
    }

    let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(body);
    if had_errors {
        return Err(LoadError::UnsupportedEncoding {
            source_name: source_name.to_string(),
            encoding: "unknown (not UTF-8 or Shift_JIS)",
        });
    }
    debug!(source = source_name, "decoded upload as Shift_JIS");
    Ok(text.into_owned())
}
