//! Person repository: in-memory collection plus snapshot persistence.
//!
//! # Responsibility
//! - Own the ordered people collection (newest records first).
//! - Serialize and persist the full collection after every mutating call.
//!
//! # Invariants
//! - `upsert` keeps a matched record at its existing position; new records are
//!   inserted at the front.
//! - `remove` deletes exactly one record; removing an absent id is a no-op and
//!   does not trigger a snapshot write.
//! - A failed snapshot write leaves the in-memory state ahead of the persisted
//!   state; the error propagates and the divergence is logged, never hidden.

use crate::model::person::Person;
use crate::store::{SnapshotStore, StoreError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying storage rejected a read or write.
    Store(StoreError),
    /// Persisted snapshot exists but cannot be decoded.
    InvalidSnapshot(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidSnapshot(message) => {
                write!(f, "invalid persisted people snapshot: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidSnapshot(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owning repository for the live people collection.
#[derive(Debug)]
pub struct PersonRepository<S: SnapshotStore> {
    store: S,
    people: Vec<Person>,
}

impl<S: SnapshotStore> PersonRepository<S> {
    /// Loads the persisted snapshot, initializing to empty when none exists.
    ///
    /// # Errors
    /// - `RepoError::Store` when the storage read fails.
    /// - `RepoError::InvalidSnapshot` when a snapshot exists but does not
    ///   decode; a corrupt snapshot is surfaced, not silently reset.
    pub fn load(store: S) -> RepoResult<Self> {
        let people = match store.load_snapshot()? {
            Some(payload) => serde_json::from_str::<Vec<Person>>(&payload)
                .map_err(|err| RepoError::InvalidSnapshot(err.to_string()))?,
            None => Vec::new(),
        };
        debug!(
            "event=repo_load module=repo status=ok people={}",
            people.len()
        );
        Ok(Self { store, people })
    }

    /// Latest in-memory collection, newest records first.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Finds one record by id.
    pub fn find(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    /// Replaces a record with a matching id in place, or inserts at the front.
    pub fn upsert(&mut self, person: Person) -> RepoResult<()> {
        match self.people.iter().position(|p| p.id == person.id) {
            Some(index) => self.people[index] = person,
            None => self.people.insert(0, person),
        }
        self.save()
    }

    /// Deletes the record with the given id.
    ///
    /// Returns whether a record was removed; an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> RepoResult<bool> {
        let before = self.people.len();
        self.people.retain(|person| person.id != id);
        if self.people.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Replaces the whole collection, committing it as one snapshot.
    ///
    /// Used by import merge/overwrite commits.
    pub fn replace_all(&mut self, people: Vec<Person>) -> RepoResult<()> {
        self.people = people;
        self.save()
    }

    /// Writes the entire current collection as one atomic snapshot.
    pub fn save(&mut self) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.people)
            .map_err(|err| RepoError::InvalidSnapshot(err.to_string()))?;
        if let Err(err) = self.store.save_snapshot(&payload) {
            error!(
                "event=snapshot_save module=repo status=error people={} error={} note=memory_ahead_of_storage",
                self.people.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Size in bytes of the snapshot currently persisted in storage.
    ///
    /// Reads the store rather than re-encoding memory, so the figure stays
    /// honest when a failed write left the in-memory state ahead of storage.
    pub fn persisted_snapshot_bytes(&self) -> RepoResult<usize> {
        Ok(self
            .store
            .load_snapshot()?
            .map_or(0, |payload| payload.len()))
    }

    /// Consumes the repository, returning the collection it owned.
    pub fn into_people(self) -> Vec<Person> {
        self.people
    }
}

/// Returns whether every id in `people` is distinct.
pub fn ids_are_unique(people: &[Person]) -> bool {
    let mut seen = std::collections::HashSet::new();
    people.iter().all(|person| seen.insert(person.id.as_str()))
}
