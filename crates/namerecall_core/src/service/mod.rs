//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, codec and reconciler calls into the user actions
//!   of the application.
//! - Keep frontend layers decoupled from storage details.

pub mod person_service;
