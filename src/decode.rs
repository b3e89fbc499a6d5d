//! Turning file bytes into embeddable text.

use crate::options::Decoding;
use crate::types::FileContent;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

const SNIFF_LEN: usize = 1024;

/// Reads `path` and decodes it according to `decoding`.
///
/// Read failures are logged and turned into [`FileContent::Error`]; they
/// never abort the run.
pub(crate) fn read_text_file(path: &Path, decoding: Decoding) -> FileContent {
    match fs::read(path) {
        Ok(bytes) => decode_bytes(path, bytes, decoding),
        Err(e) => {
            tracing::error!("Error reading file {}: {}", path.display(), e);
            FileContent::Error(e.to_string())
        }
    }
}

/// Decodes already-read bytes. `path` is only used for log messages.
pub fn decode_bytes(path: &Path, bytes: Vec<u8>, decoding: Decoding) -> FileContent {
    let text = match decoding {
        Decoding::Lossy => String::from_utf8_lossy(&bytes).into_owned(),
        Decoding::Detect => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "UTF-8 decoding failed for {}. Attempting detection.",
                    path.display()
                );
                let bytes = e.into_bytes();
                match detect_encoding(&bytes) {
                    Some(encoding) => {
                        tracing::info!(
                            "Detected encoding {} for {}.",
                            encoding.name(),
                            path.display()
                        );
                        let (text, _, _) = encoding.decode(&bytes);
                        text.into_owned()
                    }
                    None => {
                        tracing::error!(
                            "Could not detect encoding for {}. Skipping content.",
                            path.display()
                        );
                        return FileContent::Undetectable;
                    }
                }
            }
        },
    };
    FileContent::Text(strip_nulls(text))
}

/// Best-effort guess at the encoding of non-UTF-8 bytes.
///
/// A byte-order mark is trusted outright. Content dominated by NUL bytes
/// gives no guess; anything else, including text with stray NULs, goes
/// through the statistical detector.
pub fn detect_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Some(encoding);
    }
    if looks_binary(bytes) {
        return None;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Some(detector.guess(None, true))
}

/// Binary when the inspector flags it and at least a quarter of the sniffed
/// prefix is NUL bytes.
fn looks_binary(bytes: &[u8]) -> bool {
    if !content_inspector::inspect(bytes).is_binary() {
        return false;
    }
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];
    let nulls = prefix.iter().filter(|&&b| b == 0).count();
    nulls * 4 >= prefix.len()
}

fn strip_nulls(text: String) -> String {
    if text.contains('\0') {
        text.replace('\0', "")
    } else {
        text
    }
}
