//! Avatar image collaborator seam.
//!
//! # Responsibility
//! - Define the contract the core expects from an external image pipeline.
//! - Classify avatar failures distinctly from storage and backup errors.
//!
//! # Invariants
//! - The core stores encoder output verbatim in `Person::avatar`; it never
//!   inspects or transforms the payload beyond a data-URI sanity check.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Avatar pipeline failure.
#[derive(Debug)]
pub enum ImageDecodeError {
    /// Selected file could not be read.
    Unreadable(String),
    /// File was read but is not a usable image payload.
    Unsupported(String),
}

impl Display for ImageDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(message) => write!(f, "failed to read image file: {message}"),
            Self::Unsupported(message) => {
                write!(f, "unsupported or corrupt image: {message}")
            }
        }
    }
}

impl Error for ImageDecodeError {}

/// External collaborator turning a user-selected file into a self-contained
/// avatar payload (a data URI).
pub trait AvatarEncoder {
    /// Encodes the file at `path` into a data-URI payload.
    fn encode_file(&self, path: &Path) -> Result<String, ImageDecodeError>;
}

/// Cheap sanity check that a payload is a data URI before storing it.
pub fn is_data_uri(payload: &str) -> bool {
    payload.starts_with("data:")
}
