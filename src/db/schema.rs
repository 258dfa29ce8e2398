//! SQL DDL for Memoria's key/value store.
//!
//! The journal lives in a single row of `kv_store`; the table mirrors the
//! key → string contract of browser local storage. DDL uses `IF NOT EXISTS`
//! so initialization is idempotent.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize the schema. Idempotent.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
