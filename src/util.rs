//! Text decoding and file naming helpers.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Error, Result};

/// Decode bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. Falls back to Windows-1252 (common for book files written by old editors)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    tracing::debug!("input is not valid UTF-8, decoding as Windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Read a text file, mapping a missing file to [`Error::MissingResource`].
///
/// A directory counts as missing, which is what an empty data file name
/// resolves to.
pub fn read_text_file(path: &Path) -> Result<String> {
    if path.is_dir() {
        return Err(Error::MissingResource(path.to_path_buf()));
    }
    match std::fs::read(path) {
        Ok(bytes) => Ok(decode_text(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::MissingResource(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Turn a book title into a usable file stem.
///
/// Path separators would make the output land outside the output directory,
/// so they are replaced with `_`. An empty title yields `"book"`.
pub fn file_stem_for_title(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            _ => c,
        })
        .collect();

    if stem.is_empty() || stem == "." || stem == ".." {
        "book".to_string()
    } else {
        stem
    }
}
