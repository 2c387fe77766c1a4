use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{Error, Result};
use crate::models::{HISTORY_PACKAGE_VERSION, HistoryEntry, HistoryPackage};

const DB_FILE: &str = "qrsnap.db";

/// History keeps at most this many entries; the oldest insertion is evicted
/// first. Favorites are not exempt.
pub const HISTORY_CAP: usize = 20;

fn default_db_path() -> PathBuf {
    if let Ok(dir) = std::env::var("QRSNAP_DATA_DIR") {
        return PathBuf::from(dir).join(DB_FILE);
    }

    dirs::data_dir()
        .map(|dir| dir.join("qrsnap"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DB_FILE)
}

/// Ordered, capped collection of past generations, persisted to SQLite.
/// Insertion order is the rowid; listing is newest-first.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = HistoryStore { conn };
        store.init()?;
        Ok(store)
    }

    /// Open the store at the platform data dir, or wherever
    /// `QRSNAP_DATA_DIR` points.
    pub fn open_default() -> Result<Self> {
        HistoryStore::open(&default_db_path())
    }

    fn init(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS qr_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content_type TEXT NOT NULL,
                content TEXT NOT NULL,
                png BLOB NOT NULL,
                is_favorite INTEGER DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_qr_history_created
             ON qr_history(created_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Record a generation and truncate to the newest [`HISTORY_CAP`] entries.
    pub fn add(&self, entry: &HistoryEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO qr_history (content_type, content, png, is_favorite, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.content_type.as_str(),
                entry.content,
                entry.png,
                entry.favorite as i32,
                entry.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        self.conn.execute(
            "DELETE FROM qr_history
             WHERE id NOT IN (
                SELECT id FROM qr_history
                ORDER BY id DESC
                LIMIT ?1
             )",
            params![HISTORY_CAP as i64],
        )?;

        Ok(id)
    }

    pub fn list(&self, favorites_only: bool) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content_type, content, png,
                    COALESCE(is_favorite, 0) as is_favorite,
                    created_at
             FROM qr_history
             WHERE COALESCE(is_favorite, 0) >= ?1
             ORDER BY id DESC",
        )?;

        let entries = stmt
            .query_map(params![favorites_only as i32], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    pub fn get(&self, id: i64) -> Result<Option<HistoryEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT id, content_type, content, png,
                        COALESCE(is_favorite, 0) as is_favorite,
                        created_at
                 FROM qr_history
                 WHERE id = ?1",
                params![id],
                row_to_entry,
            )
            .optional()?;

        Ok(entry)
    }

    /// Flip the favorite flag. Returns false when the id is absent (no-op).
    pub fn toggle_favorite(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE qr_history
             SET is_favorite = 1 - COALESCE(is_favorite, 0)
             WHERE id = ?1",
            params![id],
        )?;
        Ok(changed > 0)
    }

    /// Returns false when the id is absent (no-op).
    pub fn remove(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM qr_history WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    pub fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM qr_history", [])?)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM qr_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Serialize the current collection, newest first.
    pub fn export_package(&self) -> Result<HistoryPackage> {
        Ok(HistoryPackage {
            version: HISTORY_PACKAGE_VERSION,
            exported_at: chrono::Local::now().to_rfc3339(),
            entries: self.list(false)?,
        })
    }

    /// Prepend the document's entries to the collection, preserving their
    /// order. Entries get fresh ids; nothing is de-duplicated or truncated.
    /// Fails without touching the store when the version is unsupported.
    pub fn import_package(&mut self, package: &HistoryPackage) -> Result<usize> {
        if package.version != HISTORY_PACKAGE_VERSION {
            return Err(Error::UnsupportedVersion(package.version));
        }

        let tx = self.conn.transaction()?;
        // The document is newest-first; inserting in reverse keeps the
        // imported block on top in that same order.
        for entry in package.entries.iter().rev() {
            tx.execute(
                "INSERT INTO qr_history (content_type, content, png, is_favorite, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.content_type.as_str(),
                    entry.content,
                    entry.png,
                    entry.favorite as i32,
                    entry.created_at,
                ],
            )?;
        }
        tx.commit()?;

        Ok(package.entries.len())
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let tag: String = row.get(1)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        content_type: crate::models::ContentType::from_tag(&tag),
        content: row.get(2)?,
        png: row.get(3)?,
        favorite: row.get::<_, i32>(4)? > 0,
        created_at: row.get(5)?,
    })
}
