//! Domain model for the people collection.
//!
//! # Responsibility
//! - Define the canonical `Person` record shared by every core layer.
//! - Provide identifier generation and display helpers.
//!
//! # Invariants
//! - `Person::id` is stable and unique across the whole collection.
//! - `color_variant` is chosen once at creation and never changes on edit.

pub mod ident;
pub mod person;
