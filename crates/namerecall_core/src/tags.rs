//! Derived tag index over the people collection.
//!
//! # Responsibility
//! - Aggregate distinct tags and per-tag member counts on demand.
//!
//! # Invariants
//! - Purely derived from the collection; recomputed per call, never cached.
//! - Tag matching is exact and case-sensitive.

use crate::model::person::Person;
use std::collections::BTreeSet;

/// All distinct tags across the collection, sorted lexicographically.
pub fn unique_tags(people: &[Person]) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for person in people {
        for tag in &person.tags {
            tags.insert(tag.clone());
        }
    }
    tags.into_iter().collect()
}

/// Number of people whose `tags` contains exactly `tag`.
pub fn tag_count(people: &[Person], tag: &str) -> usize {
    people
        .iter()
        .filter(|person| person.tags.iter().any(|t| t == tag))
        .count()
}

#[cfg(test)]
mod tests {
    use super::{tag_count, unique_tags};
    use crate::model::person::Person;

    fn person_with_tags(tags: &[&str]) -> Person {
        Person::new("someone", tags.iter().map(|t| t.to_string()).collect(), "", None)
    }

    #[test]
    fn unique_tags_sorts_and_deduplicates() {
        let people = vec![
            person_with_tags(&["work", "gym"]),
            person_with_tags(&["gym", "family"]),
        ];
        assert_eq!(unique_tags(&people), vec!["family", "gym", "work"]);
    }

    #[test]
    fn tag_count_is_exact_and_case_sensitive() {
        let people = vec![
            person_with_tags(&["Work"]),
            person_with_tags(&["work"]),
            person_with_tags(&["work", "work"]),
        ];
        assert_eq!(tag_count(&people, "work"), 2);
        assert_eq!(tag_count(&people, "Work"), 1);
        assert_eq!(tag_count(&people, "wo"), 0);
    }

    #[test]
    fn empty_collection_yields_no_tags() {
        assert!(unique_tags(&[]).is_empty());
        assert_eq!(tag_count(&[], "work"), 0);
    }
}
