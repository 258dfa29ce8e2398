use memoria::db;
use tempfile::TempDir;

#[test]
fn open_creates_new_db_at_nonexistent_path() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("subdir").join("new.db");

    // Should not exist yet
    assert!(!db_path.exists());

    let conn = db::open_database(&db_path).unwrap();

    // Should have been created
    assert!(db_path.exists());

    // Should be functional
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn reopening_existing_db_keeps_data() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("memoria.db");

    {
        let conn = db::open_database(&db_path).unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES ('k', 'v')",
            [],
        )
        .unwrap();
    }

    let conn = db::open_database(&db_path).unwrap();
    let value: String = conn
        .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(value, "v");
}

#[test]
fn wal_mode_enabled() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("wal.db");
    let conn = db::open_database(&db_path).unwrap();

    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn busy_timeout_is_set() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("busy.db");
    let conn = db::open_database(&db_path).unwrap();

    let timeout: i64 = conn
        .pragma_query_value(None, "busy_timeout", |row| row.get(0))
        .unwrap();
    assert_eq!(timeout, 5000);
}

#[test]
fn open_fails_when_parent_is_a_file() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();

    let result = db::open_database(blocker.join("memoria.db"));
    assert!(result.is_err());
}
