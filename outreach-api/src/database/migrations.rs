use rusqlite::Connection;

/// Ordered, versioned migrations. Each entry runs at most once; the
/// `schema_version` table records what has been applied. New schema changes
/// append an entry here; never edit an applied one.
const MIGRATIONS: &[(i64, &str)] = &[
    (
        1,
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL,
            english_job TEXT NOT NULL DEFAULT '',
            french_job TEXT NOT NULL DEFAULT '',
            company TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '',
            formality TEXT NOT NULL DEFAULT 'formal'
                CHECK (formality IN ('formal', 'semi-formal', 'informal')),
            role TEXT NOT NULL DEFAULT '',
            cover_letter_language TEXT NOT NULL DEFAULT 'english'
                CHECK (cover_letter_language IN ('english', 'french')),
            email_language TEXT NOT NULL DEFAULT 'english'
                CHECK (email_language IN ('english', 'french')),
            processed BOOLEAN NOT NULL DEFAULT 0,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        );",
    ),
    (
        2,
        "CREATE INDEX IF NOT EXISTS idx_contacts_processed
            ON contacts(processed);",
    ),
];

/// Bring the database to the latest schema version. Safe to call on every
/// startup; already-applied versions are skipped.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at BIGINT NOT NULL
        )",
        [],
    )?;

    let current: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        tracing::info!("Applying schema migration {}", version);
        conn.execute_batch(sql)?;
        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![version, chrono::Utc::now().timestamp()],
        )?;
    }

    Ok(())
}
