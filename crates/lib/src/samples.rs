//! Sample-query records: a JSON array on disk, regenerated offline by the
//! sampling tool and served read-only by the UI.

use crate::errors::ChatError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One reference question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub question: String,
    pub answer: String,
}

/// Reads a JSON array of sample queries from disk.
pub fn load_samples(path: &Path) -> Result<Vec<SampleQuery>, ChatError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes sample queries as a JSON array with 4-space indentation.
pub fn write_samples(path: &Path, samples: &[SampleQuery]) -> Result<(), ChatError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    samples.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}
