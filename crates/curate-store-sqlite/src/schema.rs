//! SQL schema for the Curate SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps ids from being reused after the newest row is
/// deleted.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first       TEXT NOT NULL,
    last        TEXT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS resource_types (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    resource_type TEXT NOT NULL UNIQUE,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS resources (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    name             TEXT NOT NULL,
    description      TEXT NOT NULL,
    resource_type_id INTEGER REFERENCES resource_types(id),
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reviews (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    resource_id INTEGER NOT NULL REFERENCES resources(id),
    comment     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Polymorphic: (rateable_kind, rateable_id) names the rated row, so there is
-- no foreign key. Ratings are removed together with their target.
CREATE TABLE IF NOT EXISTS ratings (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    rateable_kind TEXT NOT NULL,   -- discriminant of Rateable
    rateable_id   INTEGER NOT NULL,
    stars         INTEGER NOT NULL CHECK (stars BETWEEN 1 AND 5),
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS resources_type_idx     ON resources(resource_type_id);
CREATE INDEX IF NOT EXISTS reviews_resource_idx   ON reviews(resource_id);
CREATE INDEX IF NOT EXISTS ratings_rateable_idx   ON ratings(rateable_kind, rateable_id);

PRAGMA user_version = 1;
";
