//! Storage adapter: the whole journal as one JSON blob under a fixed key.
//!
//! [`MemoryStorage::load`] is best-effort: a missing or unparseable blob yields
//! an empty journal and a warning, never an error. [`MemoryStorage::save`]
//! overwrites the blob with the full list on every call.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::memory::types::MemoryRecord;

pub struct MemoryStorage {
    conn: Connection,
    key: String,
}

impl MemoryStorage {
    pub fn new(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored journal, newest first. Empty if nothing is stored or the
    /// blob cannot be read or parsed.
    pub fn load(&self) -> Vec<MemoryRecord> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored memories");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MemoryRecord>>(&raw) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "memories loaded");
                records
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to parse stored memories, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full list and overwrite the stored blob.
    pub fn save(&self, records: &[MemoryRecord]) -> Result<()> {
        let json = serde_json::to_string(records).context("failed to serialize memories")?;
        self.write_raw(&json)?;
        tracing::debug!(count = records.len(), bytes = json.len(), "memories saved");
        Ok(())
    }

    /// Remove the stored blob entirely.
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![self.key])
            .context("failed to clear stored memories")?;
        Ok(())
    }

    /// Size of the stored blob in bytes, 0 when nothing is stored.
    pub fn raw_len(&self) -> Result<u64> {
        let len: Option<i64> = self
            .conn
            .query_row(
                "SELECT length(CAST(value AS BLOB)) FROM kv_store WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(len.unwrap_or(0) as u64)
    }

    /// Store an arbitrary string under the journal key. Exposed so callers can
    /// restore a blob verbatim.
    pub fn write_raw(&self, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
                params![self.key, value],
            )
            .context("failed to write stored memories")?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn conn_for_tests(&self) -> &Connection {
        &self.conn
    }

    fn read_raw(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()
    }
}
