use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, Utc};

/// Evaluation date for streaks. Week boundaries are UTC midnights.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Default date for newly logged climbs.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse `YYYY-MM-DD`, or the keywords `today` / `yesterday`.
pub fn parse_climb_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .pred_opt()
            .ok_or_else(|| anyhow!("No day before {}", today)),
        s => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow!("Could not parse date '{}', expected YYYY-MM-DD", input)),
    }
}
