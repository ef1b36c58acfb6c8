//! Query/filter engine over the people collection.
//!
//! # Responsibility
//! - Derive a filtered view of the collection for list rendering.
//!
//! # Invariants
//! - Result ordering is identical to the source collection.
//! - The source collection is never mutated.
//! - Tag filter and search query compose by intersection.

use crate::model::person::Person;

/// Filter options for the people list view.
///
/// Either field may be absent, in which case that filter step is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    /// Exact tag the person must carry.
    pub tag: Option<String>,
    /// Free-text query matched as a lowercase substring against name, any tag,
    /// or memo.
    pub search: Option<String>,
}

impl PersonFilter {
    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn by_search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Self::default()
        }
    }
}

/// Applies `filter` to `people`, preserving source order.
pub fn filter_people<'a>(people: &'a [Person], filter: &PersonFilter) -> Vec<&'a Person> {
    let mut view: Vec<&Person> = people.iter().collect();

    if let Some(tag) = filter.tag.as_deref() {
        view.retain(|person| person.tags.iter().any(|t| t == tag));
    }

    if let Some(query) = filter.search.as_deref() {
        let query = query.to_lowercase();
        if !query.is_empty() {
            view.retain(|person| matches_search(person, &query));
        }
    }

    view
}

fn matches_search(person: &Person, lowercase_query: &str) -> bool {
    person.name.to_lowercase().contains(lowercase_query)
        || person
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(lowercase_query))
        || person.memo.to_lowercase().contains(lowercase_query)
}
