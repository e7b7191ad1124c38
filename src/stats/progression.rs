use anyhow::Result;
use log::warn;
use std::collections::BTreeSet;

use crate::models::{
    Climb, GradeProgression, GradeProgressionPoint, GradeScale, MonthlySummary, YearMonth,
};

/// Distinct months with at least one climb, most recent first.
pub fn list_available_months(climbs: &[Climb]) -> Vec<YearMonth> {
    let months: BTreeSet<YearMonth> = climbs
        .iter()
        .map(|c| YearMonth::from_date(c.climb_date))
        .collect();
    months.into_iter().rev().collect()
}

/// Monthly max-grade series up to and including `cutoff`, oldest first.
///
/// `monthly` produces the summary for one month. A month whose summary fails
/// is logged, recorded in `skipped`, and left out of the series.
pub fn compute_grade_progression<F>(
    scale: &GradeScale,
    months: &[YearMonth],
    cutoff: YearMonth,
    mut monthly: F,
) -> GradeProgression
where
    F: FnMut(YearMonth) -> Result<MonthlySummary>,
{
    let mut progression = GradeProgression::default();

    for &month in months.iter().filter(|m| **m <= cutoff) {
        match monthly(month) {
            Ok(summary) => progression.points.push(GradeProgressionPoint {
                year: month.year,
                month: month.month,
                grade_value: scale.value(&summary.max_grade),
                max_grade: summary.max_grade,
            }),
            Err(e) => {
                warn!("Skipping {} in grade progression: {:#}", month, e);
                progression.skipped.push(month);
            }
        }
    }

    progression.points.sort_by_key(|p| p.year_month());
    progression.skipped.sort();
    progression
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use crate::stats::compute_monthly_summary;
    use anyhow::anyhow;
    use chrono::NaiveDate;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn climb(date: &str, grade: &str) -> Climb {
        Climb {
            id: 0,
            user_id: 1,
            gym: "Boulderwelt".to_string(),
            route_type: "Boulder".to_string(),
            grade: grade.to_string(),
            outcome: Outcome::Send.to_string(),
            notes: None,
            media_url: None,
            climb_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            created_at: None,
        }
    }

    fn summary(max_grade: &str) -> MonthlySummary {
        MonthlySummary {
            total_climbs: 1,
            max_grade: max_grade.to_string(),
            success_rate: 100,
            route_type_breakdown: vec![],
        }
    }

    #[test]
    fn available_months_are_distinct_and_descending() {
        let climbs = vec![
            climb("2024-12-30", "6a"),
            climb("2025-03-02", "6b"),
            climb("2025-01-15", "6a"),
            climb("2025-03-20", "6c"),
            climb("2025-01-01", "6a"),
        ];
        assert_eq!(
            list_available_months(&climbs),
            vec![ym(2025, 3), ym(2025, 1), ym(2024, 12)]
        );
        assert!(list_available_months(&[]).is_empty());
    }

    #[test]
    fn cutoff_excludes_later_months_and_sorts_ascending() {
        let scale = GradeScale::default();
        let months = vec![ym(2025, 3), ym(2025, 1), ym(2024, 12)];

        let progression = compute_grade_progression(&scale, &months, ym(2025, 2), |m| {
            Ok(summary(if m.year == 2024 { "6a" } else { "6b+" }))
        });

        assert_eq!(
            progression.points,
            vec![
                GradeProgressionPoint {
                    year: 2024,
                    month: 12,
                    max_grade: "6a".to_string(),
                    grade_value: 2,
                },
                GradeProgressionPoint {
                    year: 2025,
                    month: 1,
                    max_grade: "6b+".to_string(),
                    grade_value: 5,
                },
            ]
        );
        assert!(progression.skipped.is_empty());
    }

    #[test]
    fn cutoff_month_itself_is_included() {
        let scale = GradeScale::default();
        let months = vec![ym(2025, 3)];
        let progression =
            compute_grade_progression(&scale, &months, ym(2025, 3), |_| Ok(summary("7a")));
        assert_eq!(progression.points.len(), 1);
        assert_eq!(progression.points[0].grade_value, 8);
    }

    #[test]
    fn failing_month_is_skipped() {
        let scale = GradeScale::default();
        let months = vec![ym(2025, 3), ym(2025, 2), ym(2025, 1)];

        let progression = compute_grade_progression(&scale, &months, ym(2025, 12), |m| {
            if m.month == 2 {
                Err(anyhow!("database is locked"))
            } else {
                Ok(summary("6c"))
            }
        });

        let got: Vec<_> = progression.points.iter().map(|p| p.year_month()).collect();
        assert_eq!(got, vec![ym(2025, 1), ym(2025, 3)]);
        assert_eq!(progression.skipped, vec![ym(2025, 2)]);
    }

    #[test]
    fn off_scale_grade_has_zero_value() {
        let scale = GradeScale::default();
        let progression =
            compute_grade_progression(&scale, &[ym(2025, 1)], ym(2025, 1), |_| Ok(summary("V4")));
        assert_eq!(progression.points[0].grade_value, 0);
    }

    #[test]
    fn composes_with_monthly_summary() {
        let scale = GradeScale::default();
        let climbs = vec![
            climb("2025-01-03", "6a"),
            climb("2025-01-20", "6b"),
            climb("2025-02-11", "6c+"),
            climb("2025-04-01", "7b"),
        ];
        let months = list_available_months(&climbs);
        let run = || {
            compute_grade_progression(&scale, &months, ym(2025, 3), |m| {
                let in_month: Vec<Climb> = climbs
                    .iter()
                    .filter(|c| YearMonth::from_date(c.climb_date) == m)
                    .cloned()
                    .collect();
                Ok(compute_monthly_summary(&scale, &in_month))
            })
        };

        let first = run();
        let grades: Vec<_> = first.points.iter().map(|p| p.max_grade.as_str()).collect();
        assert_eq!(grades, vec!["6b", "6c+"]);
        assert_eq!(first, run());
    }
}
