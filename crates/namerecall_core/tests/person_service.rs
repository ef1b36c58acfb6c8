use namerecall_core::db::{open_db_in_memory, DbError};
use namerecall_core::store::StoreResult;
use namerecall_core::{
    parse_backup, PersonDraft, PersonFilter, PersonRepository, PersonService, PersonServiceError,
    RepoError, SnapshotStore, SqliteSnapshotStore, StoreError,
};
use rusqlite::Connection;

fn service_over(conn: &Connection) -> PersonService<SqliteSnapshotStore<'_>> {
    let repo = PersonRepository::load(SqliteSnapshotStore::new(conn)).unwrap();
    PersonService::new(repo)
}

/// Store whose writes are rejected as if the device were out of space.
struct FullDiskStore;

impl SnapshotStore for FullDiskStore {
    fn load_snapshot(&self) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn save_snapshot(&mut self, _payload: &str) -> StoreResult<()> {
        Err(StoreError::Db(DbError::Sqlite(
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
                Some("database or disk is full".to_string()),
            ),
        )))
    }
}

fn draft(name: &str, tags: &[&str]) -> PersonDraft {
    PersonDraft {
        id: None,
        name: name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        memo: String::new(),
        avatar: None,
    }
}

#[test]
fn create_then_edit_preserves_id_and_color_variant() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);

    let created = service.save_person(draft("Alice", &["friend"])).unwrap();
    assert!(!created.updated_at.is_empty());

    let edited = service
        .save_person(PersonDraft {
            id: Some(created.id.clone()),
            name: "Alice B".to_string(),
            tags: vec!["friend".to_string(), "work".to_string()],
            memo: "promoted".to_string(),
            avatar: None,
        })
        .unwrap();

    assert_eq!(edited.id, created.id);
    assert_eq!(edited.color_variant, created.color_variant);
    assert_eq!(service.people().len(), 1);
    assert_eq!(service.people()[0].name, "Alice B");
}

#[test]
fn editing_unknown_id_fails_without_mutating() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &[])).unwrap();

    let err = service
        .save_person(PersonDraft {
            id: Some("missing99".to_string()),
            name: "Ghost".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, PersonServiceError::PersonNotFound(_)));
    assert_eq!(service.people().len(), 1);
}

#[test]
fn delete_person_reports_whether_a_record_was_removed() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    let created = service.save_person(draft("Alice", &[])).unwrap();

    assert!(service.delete_person(&created.id).unwrap());
    assert!(!service.delete_person(&created.id).unwrap());
    assert!(service.people().is_empty());
}

#[test]
fn export_refuses_an_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let service = service_over(&conn);
    let err = service.export_backup().unwrap_err();
    assert!(matches!(err, PersonServiceError::NothingToExport));
}

#[test]
fn export_output_round_trips_through_the_codec() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &["friend"])).unwrap();
    service.save_person(draft("Bob", &[])).unwrap();

    let json = service.export_backup().unwrap();
    let parsed = parse_backup(&json).unwrap();
    assert_eq!(parsed.people, service.people());
}

#[test]
fn failed_preview_leaves_the_collection_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &[])).unwrap();

    assert!(service.preview_import("{broken").is_err());
    assert!(service
        .preview_import(r#"{"data":[{"id":"x","tags":[]}]}"#)
        .is_err());
    assert_eq!(service.people().len(), 1);
    assert_eq!(service.people()[0].name, "Alice");
}

#[test]
fn import_merge_commits_one_persisted_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    let alice = service.save_person(draft("Alice", &["friend"])).unwrap();

    let raw = format!(
        r#"{{"data":[
            {{"id":"{}","name":"Alice B","tags":["friend","work"]}},
            {{"id":"brandnew1","name":"Bob","tags":[]}}
        ]}}"#,
        alice.id
    );
    let plan = service.preview_import(&raw).unwrap();
    assert_eq!(plan.preview.new_count, 1);
    assert_eq!(plan.preview.update_count, 1);

    let outcome = service.import_merge(&plan.parsed.people).unwrap();
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.updated, 1);

    drop(service);
    let reloaded = PersonRepository::load(SqliteSnapshotStore::new(&conn)).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.people()[0].name, "Alice B");
    assert_eq!(reloaded.people()[1].name, "Bob");
}

#[test]
fn import_overwrite_replaces_everything() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &[])).unwrap();
    service.save_person(draft("Bob", &[])).unwrap();

    let plan = service
        .preview_import(r#"{"data":[{"id":"only00001","name":"Zoe","tags":[]}]}"#)
        .unwrap();
    let replaced = service.import_overwrite(&plan.parsed.people).unwrap();
    assert_eq!(replaced, 1);
    assert_eq!(service.people().len(), 1);
    assert_eq!(service.people()[0].name, "Zoe");
}

#[test]
fn tag_index_and_filtered_views_follow_the_live_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &["work", "friend"])).unwrap();
    service.save_person(draft("Bob", &["work"])).unwrap();

    assert_eq!(service.unique_tags(), vec!["friend", "work"]);
    assert_eq!(service.tag_count("work"), 2);
    assert_eq!(
        service.list_people(&PersonFilter::by_tag("work")).len(),
        2
    );

    let bob_id = service.people()[0].id.clone();
    service.delete_person(&bob_id).unwrap();
    assert_eq!(service.unique_tags(), vec!["friend", "work"]);
    assert_eq!(service.tag_count("work"), 1);
}

#[test]
fn stats_report_counts_and_snapshot_size() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service_over(&conn);
    service.save_person(draft("Alice", &["friend"])).unwrap();

    let stats = service.stats().unwrap();
    assert_eq!(stats.people_count, 1);
    assert_eq!(stats.tag_count, 1);
    assert!(stats.snapshot_bytes > 2);
}

#[test]
fn rejected_snapshot_write_surfaces_as_a_repo_error() {
    let repo = PersonRepository::load(FullDiskStore).unwrap();
    let mut service = PersonService::new(repo);

    let err = service.save_person(draft("Alice", &[])).unwrap_err();
    assert!(matches!(
        err,
        PersonServiceError::Repo(RepoError::Store(_))
    ));
}

#[test]
fn stats_measure_the_persisted_snapshot_not_memory() {
    let repo = PersonRepository::load(FullDiskStore).unwrap();
    let mut service = PersonService::new(repo);
    // the write fails but the record stays in memory
    service.save_person(draft("Alice", &["friend"])).unwrap_err();

    let stats = service.stats().unwrap();
    assert_eq!(stats.people_count, 1);
    assert_eq!(stats.tag_count, 1);
    assert_eq!(stats.snapshot_bytes, 0);
}
