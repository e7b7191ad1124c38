use crate::models::{Climb, Outcome, TodayStats};

/// Outcome counts for one day's climbs.
pub fn compute_today_stats(climbs: &[Climb]) -> TodayStats {
    let count = |outcome: Outcome| climbs.iter().filter(|c| c.outcome_kind() == Some(outcome)).count() as u32;
    TodayStats {
        climbs: climbs.len() as u32,
        flashes: count(Outcome::Flash),
        sends: count(Outcome::Send),
        projects: count(Outcome::Project),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn climb(outcome: Outcome) -> Climb {
        Climb {
            id: 0,
            user_id: 1,
            gym: "Gravity".to_string(),
            route_type: "Lead".to_string(),
            grade: "6b".to_string(),
            outcome: outcome.to_string(),
            notes: None,
            media_url: None,
            climb_date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let climbs = vec![
            climb(Outcome::Flash),
            climb(Outcome::Send),
            climb(Outcome::Send),
            climb(Outcome::Project),
            climb(Outcome::Attempt),
        ];
        assert_eq!(
            compute_today_stats(&climbs),
            TodayStats {
                climbs: 5,
                flashes: 1,
                sends: 2,
                projects: 1,
            }
        );
        assert_eq!(compute_today_stats(&[]), TodayStats::default());
    }
}
