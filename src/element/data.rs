//! Auxiliary data files backing song, quote and picture elements.
//!
//! A data file is a single JSON object. Every field a variant knows about has
//! an empty-string default; the file's values are merged over those defaults.
//! Keys the variant does not know and keys the file leaves out are reported as
//! [`SchemaWarning`]s instead of failing the element.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::util::read_text_file;

/// The fixed set of fields a data-backed element reads.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Every recognised key.
    pub keys: &'static [&'static str],
    /// Keys that may also be given as an array of lines.
    pub multiline: &'static [&'static str],
}

impl Schema {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            multiline: &[],
        }
    }

    pub const fn with_multiline(mut self, multiline: &'static [&'static str]) -> Self {
        self.multiline = multiline;
        self
    }

    fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }
}

/// Non-fatal mismatch between a data file and its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// Schema keys the file does not define; defaults were used.
    MissingKeys { source: PathBuf, keys: Vec<String> },
    /// Keys in the file that the element ignores.
    UnusedKeys { source: PathBuf, keys: Vec<String> },
}

impl SchemaWarning {
    pub fn keys(&self) -> &[String] {
        match self {
            SchemaWarning::MissingKeys { keys, .. }
            | SchemaWarning::UnusedKeys { keys, .. } => keys,
        }
    }
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaWarning::MissingKeys { source, keys } => {
                write!(f, "{}: missing keys: {}", source.display(), keys.join(", "))
            }
            SchemaWarning::UnusedKeys { source, keys } => {
                write!(f, "{}: unused keys: {}", source.display(), keys.join(", "))
            }
        }
    }
}

/// A data file reconciled against its schema.
///
/// Holds exactly the schema's keys, each either taken from the file or
/// defaulted to `""`.
#[derive(Debug, Clone)]
pub struct DataRecord {
    source: PathBuf,
    fields: BTreeMap<&'static str, String>,
}

impl DataRecord {
    /// Read and reconcile the data file at `path`.
    pub fn load(path: &Path, schema: &Schema) -> Result<(Self, Vec<SchemaWarning>)> {
        let text = read_text_file(path)?;
        Self::parse(&text, path, schema)
    }

    /// Reconcile already-read data file text. `source` is used for messages.
    pub fn parse(text: &str, source: &Path, schema: &Schema) -> Result<(Self, Vec<SchemaWarning>)> {
        let malformed = |reason: String| Error::MalformedData {
            path: source.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_str(text.trim()).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(malformed("expected a JSON object".to_string()));
        };

        let mut fields = BTreeMap::new();
        let mut missing = Vec::new();
        for &key in schema.keys {
            match map.get(key) {
                Some(value) => {
                    let allow_lines = schema.multiline.contains(&key);
                    let text = field_text(value, allow_lines)
                        .ok_or_else(|| malformed(format!("field {key:?} must be a string")))?;
                    fields.insert(key, text);
                }
                None => {
                    missing.push(key.to_string());
                    fields.insert(key, String::new());
                }
            }
        }

        let mut unused: Vec<String> = map.keys().filter(|k| !schema.contains(k)).cloned().collect();
        unused.sort();
        missing.sort();

        let mut warnings = Vec::new();
        if !missing.is_empty() {
            warnings.push(SchemaWarning::MissingKeys {
                source: source.to_path_buf(),
                keys: missing,
            });
        }
        if !unused.is_empty() {
            warnings.push(SchemaWarning::UnusedKeys {
                source: source.to_path_buf(),
                keys: unused,
            });
        }

        let record = Self {
            source: source.to_path_buf(),
            fields,
        };
        Ok((record, warnings))
    }

    /// Path of the file this record was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Move a field out of the record. Unknown keys yield `""`.
    pub fn take(&mut self, key: &str) -> String {
        self.fields.remove(key).unwrap_or_default()
    }
}

fn field_text(value: &Value, allow_lines: bool) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(lines) if allow_lines => {
            let lines: Option<Vec<&str>> = lines.iter().map(Value::as_str).collect();
            lines.map(|lines| lines.join("\n"))
        }
        _ => None,
    }
}
