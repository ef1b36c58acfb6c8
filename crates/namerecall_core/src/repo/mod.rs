//! Repository layer owning the live people collection.
//!
//! # Responsibility
//! - Hold the authoritative in-memory list of people.
//! - Persist the whole collection as one snapshot after every mutation.
//!
//! # Invariants
//! - No two records ever share an `id`, for any sequence of operations.
//! - Readers always observe the latest in-memory state without reloading.

pub mod person_repo;
