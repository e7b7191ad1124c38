use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            email            TEXT NOT NULL UNIQUE,
            first_name       TEXT NOT NULL,
            current_streak   INTEGER NOT NULL DEFAULT 0,
            last_climb_date  TEXT,
            created_at       TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS climbs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            gym         TEXT NOT NULL,
            route_type  TEXT NOT NULL,
            grade       TEXT NOT NULL,
            outcome     TEXT NOT NULL,
            notes       TEXT,
            media_url   TEXT,
            climb_date  TEXT NOT NULL,
            created_at  TEXT DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_climbs_user_date ON climbs(user_id, climb_date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}
