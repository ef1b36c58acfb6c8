//! Import reconciliation between candidate records and the live collection.
//!
//! # Responsibility
//! - Classify candidates as new or updating before the user commits.
//! - Produce the merged or replaced collection for an atomic commit.
//!
//! # Invariants
//! - Id equality is the only identity test; same id means same logical record.
//! - Merge keeps updated records at their existing position and appends new
//!   ones; untouched live records are preserved.
//! - Duplicate ids inside one candidate batch resolve last-wins in input
//!   order, so the merged collection never carries a duplicate id.
//! - `overwrite` is destructive; the caller must gate it behind explicit
//!   confirmation.

use crate::model::person::Person;
use std::collections::HashSet;

/// Read-only classification of an import batch against the live collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportPreview {
    /// Candidates whose id is absent from the live collection.
    pub new_count: usize,
    /// Candidates whose id is already present.
    pub update_count: usize,
}

/// Feedback counts from a committed merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
}

/// Counts new vs. updating candidates without touching either collection.
pub fn preview(candidates: &[Person], live: &[Person]) -> ImportPreview {
    let existing: HashSet<&str> = live.iter().map(|person| person.id.as_str()).collect();
    let mut counts = ImportPreview::default();
    for candidate in candidates {
        if existing.contains(candidate.id.as_str()) {
            counts.update_count += 1;
        } else {
            counts.new_count += 1;
        }
    }
    counts
}

/// Unions `candidates` into `live`, updating on id match.
///
/// Candidates are processed in input order against the evolving result, so a
/// duplicate id later in the batch overwrites the earlier occurrence instead
/// of introducing a second record.
pub fn merge(candidates: &[Person], live: &[Person]) -> (Vec<Person>, MergeOutcome) {
    let mut merged = live.to_vec();
    let mut outcome = MergeOutcome::default();

    for candidate in candidates {
        match merged.iter().position(|person| person.id == candidate.id) {
            Some(index) => {
                merged[index] = candidate.clone();
                outcome.updated += 1;
            }
            None => {
                merged.push(candidate.clone());
                outcome.added += 1;
            }
        }
    }

    (merged, outcome)
}

/// Replaces the whole collection with `candidates`.
pub fn overwrite(candidates: &[Person]) -> Vec<Person> {
    candidates.to_vec()
}
