//! SQL schema for the Roster SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS persons (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (name <> ''),
    surname     TEXT NOT NULL CHECK (surname <> ''),
    patronymic  TEXT,
    age         INTEGER CHECK (age IS NULL OR age >= 0),
    gender      TEXT,
    nationality TEXT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed microsecond width
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_created_idx ON persons(created_at);

PRAGMA user_version = 1;
";
