//! Backup export/import subsystem.
//!
//! # Responsibility
//! - Serialize the people collection into a portable JSON document.
//! - Validate incoming documents and reconcile them with the live collection.
//!
//! # Invariants
//! - A document produced by export is always re-parseable by import.
//! - Import validation is all-or-nothing; one bad record rejects the batch.

pub mod codec;
pub mod reconcile;
