//! Core domain logic for namerecall, a single-user name recall tracker.
//! This crate is the single source of truth for collection invariants.

pub mod backup;
pub mod db;
pub mod logging;
pub mod media;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;
pub mod tags;

pub use backup::codec::{
    backup_file_name, document_to_json, export_document, parse_backup, BackupDocument,
    BackupError, ParsedBackup,
};
pub use backup::reconcile::{merge, overwrite, preview, ImportPreview, MergeOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use media::{is_data_uri, AvatarEncoder, ImageDecodeError};
pub use model::ident::generate_id;
pub use model::person::{now_timestamp, parse_tags, ColorVariant, Person, PersonId};
pub use query::{filter_people, PersonFilter};
pub use repo::person_repo::{ids_are_unique, PersonRepository, RepoError, RepoResult};
pub use service::person_service::{
    CollectionStats, ImportPlan, PersonDraft, PersonService, PersonServiceError, ServiceResult,
};
pub use store::{SnapshotStore, SqliteSnapshotStore, StoreError, PEOPLE_SNAPSHOT_KEY};
