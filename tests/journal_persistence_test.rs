mod helpers;

use helpers::{test_record, STORAGE_KEY};
use memoria::db;
use memoria::memory::journal::{Journal, JournalError, Screen};
use memoria::memory::storage::MemoryStorage;
use memoria::memory::types::Location;
use tempfile::TempDir;

fn open_journal(path: &std::path::Path) -> Journal {
    let conn = db::open_database(path).unwrap();
    Journal::open(MemoryStorage::new(conn, STORAGE_KEY))
}

#[test]
fn memories_survive_reopen_in_order() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    {
        let mut journal = open_journal(&db_path);
        for i in 0..5 {
            journal.start_new().unwrap();
            let mut record = test_record(&format!("m{i}"), &format!("Memória número {i}"));
            if i % 2 == 0 {
                record.location = Some(Location {
                    lat: -22.9068,
                    lng: -43.1729,
                    text: "-22.907, -43.173".into(),
                });
                record.generated_image_url = Some("data:image/png;base64,AAAA".into());
            }
            journal.save_memory(record).unwrap();
        }
    }

    let journal = open_journal(&db_path);
    let ids: Vec<&str> = journal.memories().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m4", "m3", "m2", "m1", "m0"]);

    let newest = &journal.memories()[0];
    assert_eq!(newest.content, "Memória número 4");
    assert_eq!(newest.location.as_ref().unwrap().text, "-22.907, -43.173");
    assert_eq!(
        newest.generated_image_url.as_deref(),
        Some("data:image/png;base64,AAAA")
    );
    assert!(journal.memories()[1].location.is_none());
    assert_eq!(journal.screen(), Screen::List);
}

#[test]
fn stored_blob_uses_expected_field_names() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    let mut journal = open_journal(&db_path);
    journal.start_new().unwrap();
    journal.save_memory(test_record("abc", "Chá com a avó")).unwrap();
    drop(journal);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            [STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let blob: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &blob.as_array().unwrap()[0];

    assert_eq!(entry["id"], "abc");
    assert_eq!(entry["timestamp"], 1_792_000_000_000i64);
    assert_eq!(entry["dateFormatted"], "19 de outubro de 2026");
    assert_eq!(entry["dayOfWeek"], "Segunda-feira");
    assert_eq!(entry["time"], "18:30");
    assert_eq!(entry["enrichment"]["colorHex"], "#f59e0b");
    assert_eq!(entry["enrichment"]["poeticSummary"], "O sol demorou a partir.");
    assert!(entry.get("location").is_none());
    assert!(entry.get("generatedImageUrl").is_none());
}

#[test]
fn corrupt_blob_opens_as_empty_journal() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    {
        let conn = db::open_database(&db_path).unwrap();
        MemoryStorage::new(conn, STORAGE_KEY)
            .write_raw("{not json")
            .unwrap();
    }

    let mut journal = open_journal(&db_path);
    assert!(journal.memories().is_empty());

    // The next save replaces the corrupt blob.
    journal.start_new().unwrap();
    journal.save_memory(test_record("fresh", "Recomeço")).unwrap();
    drop(journal);

    let journal = open_journal(&db_path);
    assert_eq!(journal.memories().len(), 1);
    assert_eq!(journal.memories()[0].id, "fresh");
}

#[test]
fn clear_removes_everything() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    let mut journal = open_journal(&db_path);
    journal.start_new().unwrap();
    journal.save_memory(test_record("a", "Uma")).unwrap();
    assert!(journal.storage().raw_len().unwrap() > 0);
    journal.storage().clear().unwrap();
    assert_eq!(journal.storage().raw_len().unwrap(), 0);
    drop(journal);

    assert!(open_journal(&db_path).memories().is_empty());
}

#[test]
fn screen_transitions_follow_the_flow() {
    let tmp = TempDir::new().unwrap();
    let mut journal = open_journal(&tmp.path().join("memoria.db"));

    assert_eq!(journal.screen(), Screen::List);

    journal.start_new().unwrap();
    assert_eq!(journal.screen(), Screen::Create);
    journal.cancel().unwrap();
    assert_eq!(journal.screen(), Screen::List);
    assert!(journal.memories().is_empty());

    journal.start_new().unwrap();
    journal.save_memory(test_record("x", "Feira de domingo")).unwrap();
    assert_eq!(journal.screen(), Screen::List);

    let selected = journal.select("x").unwrap();
    assert_eq!(selected.content, "Feira de domingo");
    assert_eq!(journal.screen(), Screen::View);
    assert_eq!(journal.selected().unwrap().id, "x");

    journal.back().unwrap();
    assert_eq!(journal.screen(), Screen::List);
    assert!(journal.selected().is_none());
}

#[test]
fn unknown_selection_stays_on_list() {
    let tmp = TempDir::new().unwrap();
    let mut journal = open_journal(&tmp.path().join("memoria.db"));

    let err = journal.select("missing").unwrap_err();
    assert!(matches!(err, JournalError::UnknownMemory(id) if id == "missing"));
    assert_eq!(journal.screen(), Screen::List);
}

#[test]
fn two_journals_with_different_keys_do_not_mix() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    let mut main = open_journal(&db_path);
    main.start_new().unwrap();
    main.save_memory(test_record("main", "Principal")).unwrap();

    let conn = db::open_database(&db_path).unwrap();
    let other = Journal::open(MemoryStorage::new(conn, "outro_diario"));
    assert!(other.memories().is_empty());
}
