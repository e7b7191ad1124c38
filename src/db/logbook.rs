use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::repository::{ClimbRepo, StatsRepo};
use crate::error::StoreError;
use crate::models::{Climb, ClimbPatch, NewClimb};

/// Climb mutations for one user. Each write and the streak refresh that
/// follows it commit together, so the cached streak never reflects a
/// different snapshot than the climbs table.
pub struct Logbook;

impl Logbook {
    pub fn log_climb(
        conn: &Connection,
        user_id: i64,
        climb: &NewClimb,
        today: NaiveDate,
    ) -> Result<(Climb, u32)> {
        let tx = conn.unchecked_transaction()?;
        let created = ClimbRepo::create(&tx, user_id, climb)?;
        let streak = StatsRepo::refresh_streak(&tx, user_id, today)?;
        tx.commit().context("Committing new climb")?;
        Ok((created, streak))
    }

    pub fn edit_climb(
        conn: &Connection,
        id: i64,
        user_id: i64,
        patch: &ClimbPatch,
        today: NaiveDate,
    ) -> Result<(Climb, u32)> {
        let tx = conn.unchecked_transaction()?;
        let updated = ClimbRepo::update(&tx, id, user_id, patch)?
            .ok_or(StoreError::ClimbNotFound { id, user_id })?;
        let streak = StatsRepo::refresh_streak(&tx, user_id, today)?;
        tx.commit().context("Committing climb update")?;
        Ok((updated, streak))
    }

    pub fn remove_climb(conn: &Connection, id: i64, user_id: i64, today: NaiveDate) -> Result<u32> {
        let tx = conn.unchecked_transaction()?;
        ClimbRepo::delete(&tx, id, user_id)?;
        let streak = StatsRepo::refresh_streak(&tx, user_id, today)?;
        tx.commit().context("Committing climb deletion")?;
        Ok(streak)
    }
}
