use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::str::FromStr;

use crate::cli::args::{EditArgs, LogArgs};
use crate::config::AppConfig;
use crate::db::logbook::Logbook;
use crate::db::repository::{ClimbRepo, StatsRepo, UserRepo};
use crate::models::{
    Climb, ClimbPatch, GradeScale, MonthlySummary, NewClimb, Outcome, RouteType, YearMonth,
};
use crate::utils::format::{pad, progress_bar, week_dots};
use crate::utils::time::{local_today, parse_climb_date, utc_today};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const CHALK: &str = "\x1b[38;2;222;150;80m";

// ─── Identity ────────────────────────────────────────────────────────────────

pub fn handle_login(
    conn: &Connection,
    config: &mut AppConfig,
    email: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let email = email
        .map(str::to_string)
        .or_else(|| config.user.email.clone())
        .ok_or_else(|| anyhow!("No e-mail given and `user.email` is not set in config.toml"))?;

    let user = UserRepo::get_or_create_by_email(conn, &email, name)?;
    UserRepo::set_active(conn, user.id)?;
    let streak = StatsRepo::refresh_streak(conn, user.id, utc_today())?;

    if config.user.email.as_deref() != Some(user.email.as_str()) {
        config.user.email = Some(user.email.clone());
        config.save().context("Remembering login e-mail")?;
    }

    println_colored!(GREEN, "  ✓ Signed in as {} <{}>", user.first_name, user.email);
    println_colored!(DIM, "  This week: {} day(s) climbed", streak);
    Ok(())
}

pub fn handle_logout(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    UserRepo::clear_active(conn)?;
    if config.user.email.take().is_some() {
        config.save().context("Forgetting login e-mail")?;
    }
    println_colored!(DIM, "  Signed out");
    Ok(())
}

pub fn handle_whoami(conn: &Connection) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let streak = StatsRepo::refresh_streak(conn, user.id, utc_today())?;

    println!();
    println_colored!(CHALK, "  {} <{}>", user.first_name, user.email);
    println_colored!(BOLD, "  Weekly streak: {} day(s)", streak);
    let refreshed = UserRepo::get(conn, user.id)?;
    if let Some(last) = refreshed.and_then(|u| u.last_climb_date) {
        println_colored!(DIM, "  Last climb:    {}", last);
    }
    println!();
    Ok(())
}

pub fn handle_profile(conn: &Connection, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Name cannot be empty"));
    }
    let user = UserRepo::require_active(conn)?;
    let user = UserRepo::update_name(conn, user.id, name)?;
    println_colored!(GREEN, "  ✓ Name updated to {}", user.first_name);
    Ok(())
}

// ─── Climbs ──────────────────────────────────────────────────────────────────

fn validate_grade(scale: &GradeScale, grade: &str) -> Result<String> {
    let grade = grade.trim();
    if !scale.contains(grade) {
        return Err(anyhow!(
            "Unknown grade '{}'. Use one of: {}",
            grade,
            scale.grades().join(", ")
        ));
    }
    Ok(grade.to_string())
}

fn parse_route_type(s: &str) -> Result<RouteType> {
    RouteType::from_str(s).map_err(|_| {
        let names: Vec<_> = RouteType::all().iter().map(|r| r.as_str()).collect();
        anyhow!("Unknown route type '{}'. Use one of: {}", s, names.join(", "))
    })
}

fn parse_outcome(s: &str) -> Result<Outcome> {
    Outcome::from_str(s).map_err(|_| {
        let names: Vec<_> = Outcome::all().iter().map(|o| o.as_str()).collect();
        anyhow!("Unknown outcome '{}'. Use one of: {}", s, names.join(", "))
    })
}

fn validate_gym(gym: &str) -> Result<String> {
    let gym = gym.trim();
    if gym.is_empty() {
        return Err(anyhow!("Gym cannot be empty"));
    }
    Ok(gym.to_string())
}

pub fn build_new_climb(config: &AppConfig, args: &LogArgs, today: NaiveDate) -> Result<NewClimb> {
    let gym = args
        .gym
        .as_deref()
        .unwrap_or(&config.climbing.default_gym);
    Ok(NewClimb {
        gym: validate_gym(gym)?,
        route_type: parse_route_type(&args.route_type)?,
        grade: validate_grade(&config.climbing.grade_scale, &args.grade)?,
        outcome: parse_outcome(&args.outcome)?,
        notes: args.notes.clone(),
        media_url: args.media.clone(),
        climb_date: parse_climb_date(&args.date, today)?,
    })
}

pub fn build_patch(config: &AppConfig, args: &EditArgs, today: NaiveDate) -> Result<ClimbPatch> {
    let patch = ClimbPatch {
        gym: args.gym.as_deref().map(validate_gym).transpose()?,
        route_type: args.route_type.as_deref().map(parse_route_type).transpose()?,
        grade: args
            .grade
            .as_deref()
            .map(|g| validate_grade(&config.climbing.grade_scale, g))
            .transpose()?,
        outcome: args.outcome.as_deref().map(parse_outcome).transpose()?,
        notes: args.notes.clone(),
        media_url: args.media.clone(),
        climb_date: args
            .date
            .as_deref()
            .map(|d| parse_climb_date(d, today))
            .transpose()?,
    };
    if patch.is_empty() {
        return Err(anyhow!("Nothing to change. Pass at least one field, e.g. --grade 6b"));
    }
    Ok(patch)
}

pub fn handle_log(conn: &Connection, config: &AppConfig, args: &LogArgs) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let climb = build_new_climb(config, args, local_today())?;
    let (climb, streak) = Logbook::log_climb(conn, user.id, &climb, utc_today())?;

    println_colored!(
        GREEN,
        "  ✓ #{} {} {} {} at {} ({})",
        climb.id,
        climb.route_type,
        climb.grade,
        climb.outcome,
        climb.gym,
        climb.climb_date
    );
    println_colored!(DIM, "  Weekly streak: {} day(s)", streak);
    Ok(())
}

pub fn handle_edit(conn: &Connection, config: &AppConfig, args: &EditArgs) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let patch = build_patch(config, args, local_today())?;
    let (climb, streak) = Logbook::edit_climb(conn, args.id, user.id, &patch, utc_today())?;

    println_colored!(GREEN, "  ✓ Updated climb #{}", climb.id);
    print_climb_table(&[climb]);
    println_colored!(DIM, "  Weekly streak: {} day(s)", streak);
    Ok(())
}

pub fn handle_delete(conn: &Connection, id: i64) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let streak = Logbook::remove_climb(conn, id, user.id, utc_today())?;
    println_colored!(AMBER, "  Deleted climb #{}", id);
    println_colored!(DIM, "  Weekly streak: {} day(s)", streak);
    Ok(())
}

pub fn handle_list(conn: &Connection, date: Option<&str>, month: Option<&str>) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let climbs = match (date, month) {
        (Some(date), _) => {
            let date = parse_climb_date(date, local_today())?;
            ClimbRepo::list_on_date(conn, user.id, date)?
        }
        (None, Some(month)) => {
            let month = YearMonth::from_str(month)?;
            ClimbRepo::list_in_range(conn, user.id, month.first_day()?, month.last_day()?)?
        }
        (None, None) => ClimbRepo::list_for_user(conn, user.id)?,
    };

    println!();
    if climbs.is_empty() {
        println_colored!(DIM, "  No climbs logged yet. Try `cragbook log -t boulder -g 6a -o send`");
    } else {
        print_climb_table(&climbs);
    }
    println!();
    Ok(())
}

fn outcome_color(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Flash) => CHALK,
        Some(Outcome::Send) => GREEN,
        Some(Outcome::Project) => AMBER,
        Some(Outcome::Attempt) | None => DIM,
    }
}

fn print_climb_table(climbs: &[Climb]) {
    println_colored!(
        DIM,
        "  {:>5}  {}  {}  {}  {}  {}",
        "id",
        pad("date", 10),
        pad("gym", 18),
        pad("type", 10),
        pad("grade", 5),
        "outcome"
    );
    for climb in climbs {
        println!(
            "  {:>5}  {}  {}  {}  {}  {}{}\x1b[0m",
            climb.id,
            climb.climb_date,
            pad(&climb.gym, 18),
            pad(&climb.route_type, 10),
            pad(&climb.grade, 5),
            outcome_color(climb.outcome_kind()),
            climb.outcome
        );
        if let Some(notes) = &climb.notes {
            println_colored!(DIM, "         {}", notes);
        }
        if let Some(media) = &climb.media_url {
            println_colored!(DIM, "         {}", media);
        }
    }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_today(conn: &Connection) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let today = local_today();
    let stats = StatsRepo::today_stats(conn, user.id, today)?;

    println!();
    println_colored!(CHALK, "  Today — {}", today.format("%A, %b %d"));
    println!();
    println_colored!(BOLD, "  Climbs    {}", stats.climbs);
    println_colored!(CHALK, "  Flashes   {}", stats.flashes);
    println_colored!(GREEN, "  Sends     {}", stats.sends);
    println_colored!(AMBER, "  Projects  {}", stats.projects);
    println!();
    Ok(())
}

/// Month shown when none is requested: the most recent month with climbs,
/// else the current month.
pub fn default_month(available: &[YearMonth], today: NaiveDate) -> YearMonth {
    available
        .first()
        .copied()
        .unwrap_or_else(|| YearMonth::from_date(today))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    month: YearMonth,
    weekly_streak: u32,
    #[serde(flatten)]
    summary: MonthlySummary,
}

pub fn handle_stats(
    conn: &Connection,
    config: &AppConfig,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let scale = &config.climbing.grade_scale;
    let month = match month {
        Some(m) => YearMonth::from_str(m)?,
        None => default_month(&StatsRepo::available_months(conn, user.id)?, local_today()),
    };

    let today = utc_today();
    let streak = StatsRepo::weekly_streak(conn, user.id, today)?;
    let summary = StatsRepo::monthly_stats(conn, scale, user.id, month)?;

    if json {
        let report = StatsReport {
            month,
            weekly_streak: streak,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let days = StatsRepo::week_days(conn, user.id, today)?;

    println!();
    println_colored!(CHALK, "  Statistics — {} {}", month.name(), month.year);
    println!();
    println_colored!(BOLD, "  Weekly streak:  {} day(s)", streak);
    println_colored!(DIM, "                  S M T W T F S");
    println_colored!(GREEN, "                  {}", week_dots(&days));
    println!();

    if summary.is_empty() {
        println_colored!(DIM, "  No climbs in {} {}", month.name(), month.year);
        println!();
        return Ok(());
    }

    println!("  Climbs:         {}", summary.total_climbs);
    println!("  Max grade:      {}", summary.max_grade);
    println!(
        "  Success rate:   {}%  {}",
        summary.success_rate,
        progress_bar(summary.success_rate, 100, 20)
    );
    println!();
    println_colored!(CHALK, "  Route types");
    for share in &summary.route_type_breakdown {
        println!(
            "  {}  {}  {:>3}%  ({})",
            pad(&share.route_type, 10),
            progress_bar(share.percentage, 100, 20),
            share.percentage,
            share.count
        );
    }
    println!();
    Ok(())
}

pub fn handle_months(conn: &Connection) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let months = StatsRepo::available_months(conn, user.id)?;

    println!();
    if months.is_empty() {
        println_colored!(DIM, "  No climbs logged yet");
    }
    for month in &months {
        println!("  {}  {} {}", month, month.name(), month.year);
    }
    println!();
    Ok(())
}

pub fn handle_progression(
    conn: &Connection,
    config: &AppConfig,
    upto: Option<&str>,
    json: bool,
) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let scale = &config.climbing.grade_scale;
    let cutoff = match upto {
        Some(m) => YearMonth::from_str(m)?,
        None => YearMonth::from_date(local_today()),
    };
    let progression = StatsRepo::grade_progression(conn, scale, user.id, cutoff)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&progression)?);
        return Ok(());
    }

    println!();
    println_colored!(CHALK, "  Grade progression up to {} {}", cutoff.name(), cutoff.year);
    println!();
    if progression.points.is_empty() {
        println_colored!(DIM, "  No climbs on or before {}", cutoff);
    }
    for point in &progression.points {
        let month = point.year_month();
        println!(
            "  {} {}  {}  {}",
            month.short_name(),
            month.year,
            progress_bar(point.grade_value, scale.len() as u32, 20),
            point.max_grade
        );
    }
    for month in &progression.skipped {
        println_colored!(RED, "  {} {}  could not be summarized", month.short_name(), month.year);
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection) -> Result<()> {
    let user = UserRepo::require_active(conn)?;
    let climbs = ClimbRepo::list_for_user(conn, user.id)?;
    println!("{}", serde_json::to_string_pretty(&climbs)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_args(route_type: &str, grade: &str, outcome: &str) -> LogArgs {
        LogArgs {
            gym: None,
            route_type: route_type.to_string(),
            grade: grade.to_string(),
            outcome: outcome.to_string(),
            notes: None,
            media: None,
            date: "today".to_string(),
        }
    }

    fn edit_args(id: i64) -> EditArgs {
        EditArgs {
            id,
            gym: None,
            route_type: None,
            grade: None,
            outcome: None,
            notes: None,
            media: None,
            date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
    }

    #[test]
    fn new_climb_uses_config_defaults() {
        let config = AppConfig::default();
        let climb = build_new_climb(&config, &log_args("top rope", "6a+", "flash"), today()).unwrap();
        assert_eq!(climb.gym, "Home Gym");
        assert_eq!(climb.route_type, RouteType::TopRope);
        assert_eq!(climb.grade, "6a+");
        assert_eq!(climb.outcome, Outcome::Flash);
        assert_eq!(climb.climb_date, today());
    }

    #[test]
    fn grade_must_be_on_the_scale() {
        let config = AppConfig::default();
        let err = build_new_climb(&config, &log_args("lead", "8a", "send"), today()).unwrap_err();
        assert!(err.to_string().contains("Unknown grade '8a'"));
        assert!(build_new_climb(&config, &log_args("trad", "6a", "send"), today()).is_err());
        assert!(build_new_climb(&config, &log_args("lead", "6a", "dab"), today()).is_err());
    }

    #[test]
    fn patch_needs_a_field() {
        let config = AppConfig::default();
        assert!(build_patch(&config, &edit_args(3), today()).is_err());

        let mut args = edit_args(3);
        args.outcome = Some("send".to_string());
        args.date = Some("yesterday".to_string());
        let patch = build_patch(&config, &args, today()).unwrap();
        assert_eq!(patch.outcome, Some(Outcome::Send));
        assert_eq!(patch.climb_date, NaiveDate::from_ymd_opt(2025, 6, 4));
        assert!(patch.grade.is_none());
    }

    #[test]
    fn blank_gym_is_rejected_on_log_and_edit() {
        let config = AppConfig::default();
        let mut log = log_args("boulder", "6a", "send");
        log.gym = Some("   ".to_string());
        let err = build_new_climb(&config, &log, today()).unwrap_err();
        assert!(err.to_string().contains("Gym cannot be empty"));

        let mut edit = edit_args(3);
        edit.gym = Some("   ".to_string());
        let err = build_patch(&config, &edit, today()).unwrap_err();
        assert!(err.to_string().contains("Gym cannot be empty"));

        edit.gym = Some("  Bloc Shop ".to_string());
        let patch = build_patch(&config, &edit, today()).unwrap();
        assert_eq!(patch.gym.as_deref(), Some("Bloc Shop"));
    }

    #[test]
    fn default_month_prefers_latest_climbed() {
        let months = vec![YearMonth::new(2025, 3).unwrap(), YearMonth::new(2025, 1).unwrap()];
        assert_eq!(default_month(&months, today()), YearMonth::new(2025, 3).unwrap());
        assert_eq!(default_month(&[], today()), YearMonth::new(2025, 6).unwrap());
    }
}
