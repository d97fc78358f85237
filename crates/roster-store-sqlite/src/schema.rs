//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One JSON document per person. The key columns hold the lower-cased name
-- pair and exist only to back the unique index.
CREATE TABLE IF NOT EXISTS people (
    id             TEXT PRIMARY KEY,
    lastname_key   TEXT NOT NULL,
    firstname_key  TEXT NOT NULL,
    document       TEXT NOT NULL,
    UNIQUE (lastname_key, firstname_key)
);

PRAGMA user_version = 1;
";
