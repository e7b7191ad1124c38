use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};

/// Most recent Sunday at or before `date`.
///
/// Dates are UTC calendar days, so a late Saturday climb logged from a
/// timezone behind UTC can land in the following week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Number of distinct days climbed in the Sunday–Saturday week containing
/// `today`. Not a consecutive-day streak: it resets every Sunday.
pub fn compute_weekly_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut weeks: HashMap<NaiveDate, u32> = HashMap::new();
    for date in unique {
        *weeks.entry(week_start(date)).or_default() += 1;
    }

    weeks.get(&week_start(today)).copied().unwrap_or(0)
}

/// Sunday-first flags for each day of `today`'s week that has a climb.
pub fn week_days_climbed<I>(dates: I, today: NaiveDate) -> [bool; 7]
where
    I: IntoIterator<Item = NaiveDate>,
{
    let start = week_start(today);
    let mut days = [false; 7];
    for date in dates {
        let offset = (date - start).num_days();
        if (0..7).contains(&offset) {
            days[offset as usize] = true;
        }
    }
    days
}
