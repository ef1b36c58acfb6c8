//! Backup document codec.
//!
//! # Responsibility
//! - Wrap the full people collection with export metadata.
//! - Classify incoming documents into parse, schema and record failures.
//!
//! # Invariants
//! - `parse_backup(export)` round-trips the collection structurally.
//! - Candidate records are returned unmodified; merging is the reconciler's
//!   job.

use crate::model::person::{now_timestamp, Person};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Application tag written into every exported document.
pub const BACKUP_APP_NAME: &str = "namerecall";
/// Backup format version tag.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Classified backup input failure.
#[derive(Debug)]
pub enum BackupError {
    /// Input is not valid JSON at all.
    Format(String),
    /// Input parses but lacks the required top-level shape.
    Schema(String),
    /// One record fails field validation; the whole import is rejected.
    RecordValidation { index: usize, reason: String },
    /// Outbound serialization failed.
    Encode(String),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(message) => write!(f, "backup is not valid JSON: {message}"),
            Self::Schema(message) => write!(f, "backup has invalid shape: {message}"),
            Self::RecordValidation { index, reason } => {
                write!(f, "backup record {index} is invalid: {reason}")
            }
            Self::Encode(message) => write!(f, "failed to encode backup: {message}"),
        }
    }
}

impl Error for BackupError {}

/// Portable snapshot wrapping the full people collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub app_name: String,
    pub version: String,
    /// ISO-8601 export timestamp.
    pub export_date: String,
    pub people_count: usize,
    pub data: Vec<Person>,
}

/// Validated import candidates plus original document metadata for preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBackup {
    /// Candidate records, unmodified and not yet merged.
    pub people: Vec<Person>,
    /// Exporter timestamp as declared by the document, if any.
    pub export_date: Option<String>,
    /// Record count as declared by the document, if any.
    pub declared_count: Option<u64>,
}

/// Wraps the current collection into a backup document.
pub fn export_document(people: &[Person]) -> BackupDocument {
    BackupDocument {
        app_name: BACKUP_APP_NAME.to_string(),
        version: BACKUP_FORMAT_VERSION.to_string(),
        export_date: now_timestamp(),
        people_count: people.len(),
        data: people.to_vec(),
    }
}

/// Renders a backup document as pretty-printed JSON.
pub fn document_to_json(document: &BackupDocument) -> Result<String, BackupError> {
    serde_json::to_string_pretty(document).map_err(|err| BackupError::Encode(err.to_string()))
}

/// Suggested file name for a backup exported on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}_backup_{}.json", BACKUP_APP_NAME, date.format("%Y-%m-%d"))
}

/// Validates and parses raw backup text into candidate records.
///
/// # Errors
/// - `BackupError::Format` for malformed JSON.
/// - `BackupError::Schema` when the top-level `data` field is missing or not
///   an array.
/// - `BackupError::RecordValidation` when any record lacks a non-empty `id`
///   or `name`, or its `tags` is not an array of strings. No partial
///   acceptance: the first bad record rejects the whole batch.
pub fn parse_backup(raw: &str) -> Result<ParsedBackup, BackupError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|err| BackupError::Format(err.to_string()))?;

    let records = match document.get("data") {
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(BackupError::Schema(
                "top-level `data` field is not an array".to_string(),
            ))
        }
        None => {
            return Err(BackupError::Schema(
                "top-level `data` field is missing".to_string(),
            ))
        }
    };

    let mut people = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        validate_record(index, record)?;
        let person: Person = serde_json::from_value(record.clone()).map_err(|err| {
            BackupError::RecordValidation {
                index,
                reason: err.to_string(),
            }
        })?;
        people.push(person);
    }

    Ok(ParsedBackup {
        people,
        export_date: document
            .get("exportDate")
            .and_then(Value::as_str)
            .map(str::to_string),
        declared_count: document.get("peopleCount").and_then(Value::as_u64),
    })
}

fn validate_record(index: usize, record: &Value) -> Result<(), BackupError> {
    let invalid = |reason: &str| BackupError::RecordValidation {
        index,
        reason: reason.to_string(),
    };

    let Some(fields) = record.as_object() else {
        return Err(invalid("record is not an object"));
    };

    match fields.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => {}
        _ => return Err(invalid("missing or empty `id`")),
    }

    match fields.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {}
        _ => return Err(invalid("missing or empty `name`")),
    }

    if !fields.get("tags").is_some_and(Value::is_array) {
        return Err(invalid("`tags` is missing or not an array"));
    }

    Ok(())
}
