//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical record for one tracked individual.
//! - Keep the wire shape (camelCase fields, explicit `null` avatar) identical
//!   between the persisted snapshot and the backup document.
//!
//! # Invariants
//! - `id` is never regenerated once assigned.
//! - `color_variant` comes from the fixed six-entry palette.
//! - `updated_at` is stamped on every save (create or edit).

use crate::model::ident;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stable opaque identifier for a person record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = String;

/// Fixed palette tag used for fallback avatar rendering when no image is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorVariant {
    #[default]
    #[serde(rename = "bg-gradient-1")]
    Gradient1,
    #[serde(rename = "bg-gradient-2")]
    Gradient2,
    #[serde(rename = "bg-gradient-3")]
    Gradient3,
    #[serde(rename = "bg-gradient-4")]
    Gradient4,
    #[serde(rename = "bg-gradient-5")]
    Gradient5,
    #[serde(rename = "bg-gradient-6")]
    Gradient6,
}

impl ColorVariant {
    /// Full palette in declaration order.
    pub const PALETTE: [ColorVariant; 6] = [
        ColorVariant::Gradient1,
        ColorVariant::Gradient2,
        ColorVariant::Gradient3,
        ColorVariant::Gradient4,
        ColorVariant::Gradient5,
        ColorVariant::Gradient6,
    ];

    /// CSS class name this variant serializes to.
    pub fn as_class(&self) -> &'static str {
        match self {
            Self::Gradient1 => "bg-gradient-1",
            Self::Gradient2 => "bg-gradient-2",
            Self::Gradient3 => "bg-gradient-3",
            Self::Gradient4 => "bg-gradient-4",
            Self::Gradient5 => "bg-gradient-5",
            Self::Gradient6 => "bg-gradient-6",
        }
    }
}

/// One tracked individual.
///
/// Optional fields default on deserialization so older backups that omit
/// them still load; `avatar` is serialized as an explicit `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable opaque id, generated for new records, preserved on edit.
    pub id: PersonId,
    /// Display name. May be empty; display helpers render a placeholder.
    pub name: String,
    /// Ordered tag labels as entered. The data layer does not deduplicate.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text memo, may be empty.
    #[serde(default)]
    pub memo: String,
    /// Self-contained image payload (data URI), or `null` when unset.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Fallback avatar palette tag, fixed at creation time.
    #[serde(default)]
    pub color_variant: ColorVariant,
    /// ISO-8601 timestamp of the last save.
    #[serde(default)]
    pub updated_at: String,
}

impl Person {
    /// Creates a new record with a generated id and palette pick.
    pub fn new(
        name: impl Into<String>,
        tags: Vec<String>,
        memo: impl Into<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            id: ident::generate_id(),
            name: name.into(),
            tags,
            memo: memo.into(),
            avatar,
            color_variant: ident::pick_color_variant(),
            updated_at: now_timestamp(),
        }
    }

    /// Uppercase initials for fallback avatar rendering.
    ///
    /// Two-word names yield both initials; blank names yield `"?"`.
    pub fn initials(&self) -> String {
        let mut parts = self.name.split_whitespace();
        let Some(first) = parts.next() else {
            return "?".to_string();
        };
        let mut out: String = first.chars().take(1).flat_map(char::to_uppercase).collect();
        if let Some(second) = parts.next() {
            out.extend(second.chars().take(1).flat_map(char::to_uppercase));
        }
        out
    }
}

/// Splits comma-separated tag input into trimmed, non-empty labels.
///
/// Insertion order is preserved and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Current wall-clock time as an ISO-8601 string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, Person};

    fn person_named(name: &str) -> Person {
        Person::new(name, Vec::new(), "", None)
    }

    #[test]
    fn initials_uses_up_to_two_name_parts() {
        assert_eq!(person_named("alice").initials(), "A");
        assert_eq!(person_named("alice baker").initials(), "AB");
        assert_eq!(person_named("  alice   baker carol ").initials(), "AB");
    }

    #[test]
    fn initials_falls_back_for_blank_names() {
        assert_eq!(person_named("").initials(), "?");
        assert_eq!(person_named("   ").initials(), "?");
    }

    #[test]
    fn parse_tags_trims_and_drops_empty_entries() {
        assert_eq!(
            parse_tags(" friend , work ,, gym "),
            vec!["friend", "work", "gym"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags("  ,  ").is_empty());
    }

    #[test]
    fn parse_tags_keeps_order_and_duplicates() {
        assert_eq!(parse_tags("b,a,b"), vec!["b", "a", "b"]);
    }
}
