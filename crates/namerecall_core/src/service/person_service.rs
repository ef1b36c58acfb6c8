//! Person use-case service.
//!
//! # Responsibility
//! - Provide create/edit/delete/list entry points over the repository.
//! - Drive backup export and the two-step import flow (preview, then commit).
//!
//! # Invariants
//! - Edits preserve the record's `color_variant` and position; only new
//!   records get a generated id and palette pick.
//! - `updated_at` is stamped on every save.
//! - Import commits are atomic: either the whole reconciled collection is
//!   persisted or the live collection stays untouched.
//! - Destructive actions (delete, overwrite import) are confirmation-gated by
//!   the caller; the service trusts that gate.

use crate::backup::codec::{self, BackupError, ParsedBackup};
use crate::backup::reconcile::{self, ImportPreview, MergeOutcome};
use crate::model::person::{now_timestamp, Person, PersonId};
use crate::query::{filter_people, PersonFilter};
use crate::repo::person_repo::{PersonRepository, RepoError};
use crate::store::SnapshotStore;
use crate::tags;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, PersonServiceError>;

/// Service error for person use-cases.
#[derive(Debug)]
pub enum PersonServiceError {
    /// Edit targeted an id that does not exist.
    PersonNotFound(PersonId),
    /// Export refused because the collection is empty.
    NothingToExport,
    /// Backup input or output failure.
    Backup(BackupError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for PersonServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::NothingToExport => write!(f, "there is no data to export"),
            Self::Backup(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersonServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersonNotFound(_) | Self::NothingToExport => None,
            Self::Backup(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<BackupError> for PersonServiceError {
    fn from(value: BackupError) -> Self {
        Self::Backup(value)
    }
}

impl From<RepoError> for PersonServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Form input for creating or editing a person.
///
/// `id = None` creates a new record; `id = Some` edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub id: Option<PersonId>,
    pub name: String,
    pub tags: Vec<String>,
    pub memo: String,
    pub avatar: Option<String>,
}

/// Validated import batch together with its preview classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub parsed: ParsedBackup,
    pub preview: ImportPreview,
}

/// Collection statistics for the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub people_count: usize,
    pub tag_count: usize,
    /// Size in bytes of the snapshot actually persisted in storage.
    pub snapshot_bytes: usize,
}

/// Use-case service wrapping the person repository.
pub struct PersonService<S: SnapshotStore> {
    repo: PersonRepository<S>,
}

impl<S: SnapshotStore> PersonService<S> {
    /// Creates a service over a loaded repository.
    pub fn new(repo: PersonRepository<S>) -> Self {
        Self { repo }
    }

    /// Latest collection state, newest records first.
    pub fn people(&self) -> &[Person] {
        self.repo.people()
    }

    /// Looks up one person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.repo.find(id)
    }

    /// Filtered, order-preserving view of the collection.
    pub fn list_people(&self, filter: &PersonFilter) -> Vec<&Person> {
        filter_people(self.repo.people(), filter)
    }

    /// Distinct tags across the collection, sorted.
    pub fn unique_tags(&self) -> Vec<String> {
        tags::unique_tags(self.repo.people())
    }

    /// Number of people carrying exactly `tag`.
    pub fn tag_count(&self, tag: &str) -> usize {
        tags::tag_count(self.repo.people(), tag)
    }

    /// Creates or edits a person from form input and persists the change.
    pub fn save_person(&mut self, draft: PersonDraft) -> ServiceResult<Person> {
        let person = match draft.id {
            Some(id) => {
                let existing = self
                    .repo
                    .find(&id)
                    .ok_or_else(|| PersonServiceError::PersonNotFound(id.clone()))?;
                Person {
                    id,
                    name: draft.name,
                    tags: draft.tags,
                    memo: draft.memo,
                    avatar: draft.avatar,
                    color_variant: existing.color_variant,
                    updated_at: now_timestamp(),
                }
            }
            None => Person::new(draft.name, draft.tags, draft.memo, draft.avatar),
        };

        self.repo.upsert(person.clone())?;
        Ok(person)
    }

    /// Deletes one person by id; confirmation is the caller's responsibility.
    ///
    /// Returns whether a record was removed.
    pub fn delete_person(&mut self, id: &str) -> ServiceResult<bool> {
        Ok(self.repo.remove(id)?)
    }

    /// Exports the full collection as pretty-printed backup JSON.
    pub fn export_backup(&self) -> ServiceResult<String> {
        if self.repo.is_empty() {
            return Err(PersonServiceError::NothingToExport);
        }
        let document = codec::export_document(self.repo.people());
        Ok(codec::document_to_json(&document)?)
    }

    /// Validates raw backup text and classifies it against the live
    /// collection, without committing anything.
    pub fn preview_import(&self, raw: &str) -> ServiceResult<ImportPlan> {
        let parsed = codec::parse_backup(raw)?;
        let preview = reconcile::preview(&parsed.people, self.repo.people());
        Ok(ImportPlan { parsed, preview })
    }

    /// Merges candidates into the live collection and commits one snapshot.
    pub fn import_merge(&mut self, candidates: &[Person]) -> ServiceResult<MergeOutcome> {
        let (merged, outcome) = reconcile::merge(candidates, self.repo.people());
        self.repo.replace_all(merged)?;
        info!(
            "event=import_commit module=service status=ok strategy=merge added={} updated={}",
            outcome.added, outcome.updated
        );
        Ok(outcome)
    }

    /// Replaces the live collection with candidates and commits one snapshot.
    ///
    /// Destructive; callers must have obtained explicit confirmation.
    pub fn import_overwrite(&mut self, candidates: &[Person]) -> ServiceResult<usize> {
        let replaced = candidates.len();
        self.repo.replace_all(reconcile::overwrite(candidates))?;
        info!(
            "event=import_commit module=service status=ok strategy=overwrite count={replaced}"
        );
        Ok(replaced)
    }

    /// People/tag counts and the persisted snapshot size for the settings
    /// view.
    ///
    /// The byte figure is read back from storage, not re-encoded from memory,
    /// so it reflects what would survive a restart.
    pub fn stats(&self) -> ServiceResult<CollectionStats> {
        Ok(CollectionStats {
            people_count: self.repo.len(),
            tag_count: self.unique_tags().len(),
            snapshot_bytes: self.repo.persisted_snapshot_bytes()?,
        })
    }
}
