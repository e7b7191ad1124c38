//! Streak and aggregation engine.
//!
//! Everything in here is a pure function over climb records handed in by the
//! caller. Storage reads and the wall clock live in `db::repository`.

pub mod monthly;
pub mod progression;
pub mod streak;
pub mod today;

pub use monthly::compute_monthly_summary;
pub use progression::{compute_grade_progression, list_available_months};
pub use streak::{compute_weekly_streak, week_start, week_days_climbed};
pub use today::compute_today_stats;

/// `part / total` as a percentage rounded half-up, computed exactly in
/// integers. `total == 0` yields 0.
pub fn rounded_percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u64, total as u64);
    ((part * 200 + total) / (total * 2)) as u32
}
