pub mod contacts;
pub mod migrations;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Handle to the embedded contact store. Every operation checks a connection
/// out of the pool and returns it when done; no transaction ever spans more
/// than one record.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database file and bring it to the latest schema
    /// version.
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(4).build(manager)?;

        {
            let conn = pool.get()?;
            migrations::run_migrations(&conn)?;
        }

        Ok(Database { pool })
    }

    /// In-memory database for tests. Pool size 1 so every checkout sees the
    /// same connection (an in-memory SQLite database is per-connection).
    pub fn in_memory() -> anyhow::Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        {
            let conn = pool.get()?;
            migrations::run_migrations(&conn)?;
        }
        Ok(Database { pool })
    }

    pub fn conn(&self) -> anyhow::Result<DbConn> {
        Ok(self.pool.get()?)
    }
}

/// Platform data path for the contact store, e.g.
/// `~/.local/share/outreach/contacts.db` on Linux.
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("outreach").join("contacts.db"))
}
