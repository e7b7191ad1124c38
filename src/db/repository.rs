use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::error::StoreError;
use crate::models::{
    Climb, ClimbPatch, GradeProgression, GradeScale, MonthlySummary, NewClimb, TodayStats, User,
    YearMonth,
};
use crate::models::user::name_from_email;
use crate::stats;

const DATE_FMT: &str = "%Y-%m-%d";
const ACTIVE_USER_KEY: &str = "active_user";

fn fmt_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| anyhow!("Bad date '{}': {}", s, e))
}

fn check_user_id(user_id: i64) -> Result<()> {
    if user_id <= 0 {
        return Err(StoreError::InvalidUser(user_id).into());
    }
    Ok(())
}

// ─── User repo ───────────────────────────────────────────────────────────────

const USER_COLUMNS: &str =
    "id, email, first_name, current_streak, last_climb_date, created_at";

fn read_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let last: Option<String> = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        current_streak: row.get(3)?,
        last_climb_date: last.and_then(|s| NaiveDate::parse_from_str(&s, DATE_FMT).ok()),
        created_at: row.get(5)?,
    })
}

pub struct UserRepo;

impl UserRepo {
    pub fn get(conn: &Connection, user_id: i64) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![user_id],
            read_user,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn get_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email.trim().to_lowercase()],
            read_user,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn create(conn: &Connection, email: &str, first_name: Option<&str>) -> Result<User> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(anyhow!("'{}' is not an e-mail address", email));
        }
        let first_name = first_name
            .map(str::to_string)
            .unwrap_or_else(|| name_from_email(&email));

        conn.execute(
            "INSERT INTO users (email, first_name) VALUES (?1, ?2)",
            params![email, first_name],
        )?;
        let id = conn.last_insert_rowid();
        info!("Created user {} ({})", id, email);
        Self::get(conn, id)?.ok_or_else(|| StoreError::UserNotFound(id).into())
    }

    pub fn get_or_create_by_email(
        conn: &Connection,
        email: &str,
        first_name: Option<&str>,
    ) -> Result<User> {
        match Self::get_by_email(conn, email)? {
            Some(user) => Ok(user),
            None => Self::create(conn, email, first_name),
        }
    }

    pub fn update_name(conn: &Connection, user_id: i64, first_name: &str) -> Result<User> {
        check_user_id(user_id)?;
        let changed = conn.execute(
            "UPDATE users SET first_name = ?1 WHERE id = ?2",
            params![first_name, user_id],
        )?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(user_id).into());
        }
        Self::get(conn, user_id)?.ok_or_else(|| StoreError::UserNotFound(user_id).into())
    }

    pub fn update_streak(
        conn: &Connection,
        user_id: i64,
        streak: u32,
        last_climb_date: Option<NaiveDate>,
    ) -> Result<()> {
        check_user_id(user_id)?;
        conn.execute(
            "UPDATE users SET current_streak = ?1, last_climb_date = ?2 WHERE id = ?3",
            params![streak, last_climb_date.map(fmt_date), user_id],
        )?;
        Ok(())
    }

    /// The signed-in identity, if any.
    pub fn active(conn: &Connection) -> Result<Option<User>> {
        let Some(value) = MetaRepo::get(conn, ACTIVE_USER_KEY)? else {
            return Ok(None);
        };
        let id: i64 = value
            .parse()
            .map_err(|_| anyhow!("Corrupt active user id '{}'", value))?;
        Self::get(conn, id)
    }

    pub fn require_active(conn: &Connection) -> Result<User> {
        Self::active(conn)?.ok_or_else(|| StoreError::NoActiveUser.into())
    }

    pub fn set_active(conn: &Connection, user_id: i64) -> Result<()> {
        check_user_id(user_id)?;
        MetaRepo::set(conn, ACTIVE_USER_KEY, &user_id.to_string())
    }

    pub fn clear_active(conn: &Connection) -> Result<()> {
        MetaRepo::delete(conn, ACTIVE_USER_KEY)
    }
}

// ─── Climb repo ──────────────────────────────────────────────────────────────

const CLIMB_COLUMNS: &str =
    "id, user_id, gym, route_type, grade, outcome, notes, media_url, climb_date, created_at";
const CLIMB_ORDER: &str = "ORDER BY climb_date DESC, created_at DESC, id DESC";

type ClimbRow = (
    i64,
    i64,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    Option<String>,
);

fn read_climb_row(row: &Row<'_>) -> rusqlite::Result<ClimbRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn climb_from_row(raw: ClimbRow) -> Result<Climb> {
    let (id, user_id, gym, route_type, grade, outcome, notes, media_url, climb_date, created_at) =
        raw;
    Ok(Climb {
        id,
        user_id,
        gym,
        route_type,
        grade,
        outcome,
        notes,
        media_url,
        climb_date: parse_date(&climb_date)?,
        created_at,
    })
}

/// Runs a climb query, skipping rows whose date does not parse so one bad
/// record cannot blank out a whole listing.
fn query_climbs<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Climb>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_climb_row)?;

    let mut result = Vec::new();
    for r in rows {
        let raw = r?;
        let id = raw.0;
        match climb_from_row(raw) {
            Ok(climb) => result.push(climb),
            Err(e) => warn!("Skipping malformed climb {}: {:#}", id, e),
        }
    }
    Ok(result)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct ClimbRepo;

impl ClimbRepo {
    pub fn create(conn: &Connection, user_id: i64, climb: &NewClimb) -> Result<Climb> {
        check_user_id(user_id)?;
        if UserRepo::get(conn, user_id)?.is_none() {
            return Err(StoreError::UserNotFound(user_id).into());
        }

        conn.execute(
            "INSERT INTO climbs (user_id, gym, route_type, grade, outcome, notes, media_url, climb_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                climb.gym.trim(),
                climb.route_type.as_str(),
                climb.grade,
                climb.outcome.as_str(),
                non_empty(climb.notes.as_deref()),
                non_empty(climb.media_url.as_deref()),
                fmt_date(climb.climb_date),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!("User {} logged climb {} on {}", user_id, id, climb.climb_date);
        Self::get(conn, id, user_id)?.ok_or_else(|| StoreError::ClimbNotFound { id, user_id }.into())
    }

    pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Option<Climb>> {
        check_user_id(user_id)?;
        let climbs = query_climbs(
            conn,
            &format!("SELECT {CLIMB_COLUMNS} FROM climbs WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
        )?;
        Ok(climbs.into_iter().next())
    }

    /// Every climb of the user, newest first.
    pub fn list_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Climb>> {
        check_user_id(user_id)?;
        debug!("Listing climbs for user {}", user_id);
        query_climbs(
            conn,
            &format!("SELECT {CLIMB_COLUMNS} FROM climbs WHERE user_id = ?1 {CLIMB_ORDER}"),
            params![user_id],
        )
    }

    /// Climbs with `start <= climb_date <= end`, newest first.
    pub fn list_in_range(
        conn: &Connection,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Climb>> {
        check_user_id(user_id)?;
        debug!("Listing climbs for user {} in {}..={}", user_id, start, end);
        query_climbs(
            conn,
            &format!(
                "SELECT {CLIMB_COLUMNS} FROM climbs
                 WHERE user_id = ?1 AND climb_date >= ?2 AND climb_date <= ?3 {CLIMB_ORDER}"
            ),
            params![user_id, fmt_date(start), fmt_date(end)],
        )
    }

    pub fn list_on_date(conn: &Connection, user_id: i64, date: NaiveDate) -> Result<Vec<Climb>> {
        Self::list_in_range(conn, user_id, date, date)
    }

    pub fn list_recent(conn: &Connection, user_id: i64, limit: usize) -> Result<Vec<Climb>> {
        check_user_id(user_id)?;
        query_climbs(
            conn,
            &format!(
                "SELECT {CLIMB_COLUMNS} FROM climbs WHERE user_id = ?1 {CLIMB_ORDER} LIMIT ?2"
            ),
            params![user_id, limit as i64],
        )
    }

    /// Distinct climb dates, newest first.
    pub fn list_dates(conn: &Connection, user_id: i64) -> Result<Vec<NaiveDate>> {
        check_user_id(user_id)?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT climb_date FROM climbs WHERE user_id = ?1 ORDER BY climb_date DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for r in rows {
            let raw = r?;
            match parse_date(&raw) {
                Ok(d) => dates.push(d),
                Err(e) => warn!("Skipping climb date for user {}: {:#}", user_id, e),
            }
        }
        Ok(dates)
    }

    /// Applies `patch` to a climb owned by `user_id`. `Ok(None)` when no such
    /// climb exists for that user. An empty string clears notes or media.
    pub fn update(
        conn: &Connection,
        id: i64,
        user_id: i64,
        patch: &ClimbPatch,
    ) -> Result<Option<Climb>> {
        check_user_id(user_id)?;
        let changed = conn.execute(
            "UPDATE climbs SET
                gym        = COALESCE(?1, gym),
                route_type = COALESCE(?2, route_type),
                grade      = COALESCE(?3, grade),
                outcome    = COALESCE(?4, outcome),
                notes      = CASE WHEN ?5 IS NULL THEN notes ELSE NULLIF(TRIM(?5), '') END,
                media_url  = CASE WHEN ?6 IS NULL THEN media_url ELSE NULLIF(TRIM(?6), '') END,
                climb_date = COALESCE(?7, climb_date)
             WHERE id = ?8 AND user_id = ?9",
            params![
                patch.gym.as_deref().map(str::trim),
                patch.route_type.map(|r| r.as_str()),
                patch.grade,
                patch.outcome.map(|o| o.as_str()),
                patch.notes,
                patch.media_url,
                patch.climb_date.map(fmt_date),
                id,
                user_id,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        info!("User {} updated climb {}", user_id, id);
        Self::get(conn, id, user_id)
    }

    pub fn delete(conn: &Connection, id: i64, user_id: i64) -> Result<()> {
        check_user_id(user_id)?;
        let changed = conn.execute(
            "DELETE FROM climbs WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(StoreError::ClimbNotFound { id, user_id }.into());
        }
        info!("User {} deleted climb {}", user_id, id);
        Ok(())
    }
}

// ─── Stats repo ──────────────────────────────────────────────────────────────

/// Feeds storage reads into the stats engine.
pub struct StatsRepo;

impl StatsRepo {
    pub fn today_stats(conn: &Connection, user_id: i64, date: NaiveDate) -> Result<TodayStats> {
        let climbs = ClimbRepo::list_on_date(conn, user_id, date)?;
        Ok(stats::compute_today_stats(&climbs))
    }

    pub fn monthly_stats(
        conn: &Connection,
        scale: &GradeScale,
        user_id: i64,
        month: YearMonth,
    ) -> Result<MonthlySummary> {
        let climbs =
            ClimbRepo::list_in_range(conn, user_id, month.first_day()?, month.last_day()?)?;
        Ok(stats::compute_monthly_summary(scale, &climbs))
    }

    pub fn available_months(conn: &Connection, user_id: i64) -> Result<Vec<YearMonth>> {
        let climbs = ClimbRepo::list_for_user(conn, user_id)?;
        Ok(stats::list_available_months(&climbs))
    }

    pub fn grade_progression(
        conn: &Connection,
        scale: &GradeScale,
        user_id: i64,
        cutoff: YearMonth,
    ) -> Result<GradeProgression> {
        let months = Self::available_months(conn, user_id)?;
        Ok(stats::compute_grade_progression(scale, &months, cutoff, |m| {
            Self::monthly_stats(conn, scale, user_id, m)
        }))
    }

    pub fn weekly_streak(conn: &Connection, user_id: i64, today: NaiveDate) -> Result<u32> {
        let dates = ClimbRepo::list_dates(conn, user_id)?;
        Ok(stats::compute_weekly_streak(dates, today))
    }

    pub fn week_days(conn: &Connection, user_id: i64, today: NaiveDate) -> Result<[bool; 7]> {
        let start = stats::week_start(today);
        let end = start + chrono::Duration::days(6);
        let climbs = ClimbRepo::list_in_range(conn, user_id, start, end)?;
        Ok(stats::week_days_climbed(climbs.iter().map(|c| c.climb_date), today))
    }

    /// Recomputes the weekly streak from a fresh read and rewrites the cached
    /// copy on the user row.
    pub fn refresh_streak(conn: &Connection, user_id: i64, today: NaiveDate) -> Result<u32> {
        let dates = ClimbRepo::list_dates(conn, user_id)?;
        let last = dates.first().copied();
        let streak = stats::compute_weekly_streak(dates, today);
        UserRepo::update_streak(conn, user_id, streak, last)?;
        info!("User {} weekly streak is now {}", user_id, streak);
        Ok(streak)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}
