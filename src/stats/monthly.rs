use std::collections::BTreeMap;

use super::rounded_percent;
use crate::models::{Climb, GradeScale, MonthlySummary, RouteTypeShare};

/// Smallest share (percent of the month's climbs) a route type needs to be
/// listed in the breakdown.
pub const MIN_BREAKDOWN_SHARE: u32 = 5;

/// Summarize one month of climbs.
///
/// `climbs` must already be restricted to the month. Grades missing from
/// `scale` never become the max grade. An empty month reports the weakest
/// grade and a 0% success rate.
pub fn compute_monthly_summary(scale: &GradeScale, climbs: &[Climb]) -> MonthlySummary {
    let total = climbs.len() as u32;

    let mut max_rank: Option<usize> = None;
    let mut successful = 0u32;
    let mut tallies: BTreeMap<&str, u32> = BTreeMap::new();

    for climb in climbs {
        if let Some(rank) = scale.rank(&climb.grade) {
            if max_rank.is_none_or(|max| rank > max) {
                max_rank = Some(rank);
            }
        }
        if climb.is_success() {
            successful += 1;
        }
        *tallies.entry(climb.route_type.as_str()).or_default() += 1;
    }

    let max_grade = match max_rank {
        Some(rank) => scale.grades()[rank].clone(),
        None => scale.weakest().to_string(),
    };

    MonthlySummary {
        total_climbs: total,
        max_grade,
        success_rate: rounded_percent(successful, total),
        route_type_breakdown: route_type_breakdown(tallies, total),
    }
}

// The threshold applies to the exact share; the reported percentage is
// rounded afterwards, so 1 of 21 (4.76%) is dropped despite displaying as 5.
fn route_type_breakdown(tallies: BTreeMap<&str, u32>, total: u32) -> Vec<RouteTypeShare> {
    let mut shares: Vec<RouteTypeShare> = tallies
        .into_iter()
        .filter(|(_, count)| *count as u64 * 100 >= MIN_BREAKDOWN_SHARE as u64 * total as u64)
        .map(|(route_type, count)| RouteTypeShare {
            route_type: route_type.to_string(),
            count,
            percentage: rounded_percent(count, total),
        })
        .collect();

    // stable: equal counts stay in name order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use chrono::NaiveDate;

    fn climb(grade: &str, route_type: &str, outcome: Outcome, date: &str) -> Climb {
        Climb {
            id: 0,
            user_id: 1,
            gym: "The Arch".to_string(),
            route_type: route_type.to_string(),
            grade: grade.to_string(),
            outcome: outcome.to_string(),
            notes: None,
            media_url: None,
            climb_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            created_at: None,
        }
    }

    fn boulder(grade: &str, outcome: Outcome) -> Climb {
        climb(grade, "Boulder", outcome, "2025-06-10")
    }

    #[test]
    fn empty_month_has_default_summary() {
        let scale = GradeScale::default();
        let summary = compute_monthly_summary(&scale, &[]);
        assert_eq!(
            summary,
            MonthlySummary {
                total_climbs: 0,
                max_grade: "5c".to_string(),
                success_rate: 0,
                route_type_breakdown: vec![],
            }
        );
        assert!(summary.is_empty());
    }

    #[test]
    fn max_grade_is_highest_rank() {
        let scale = GradeScale::default();
        let climbs = vec![
            boulder("6a", Outcome::Send),
            boulder("6c", Outcome::Send),
            boulder("5c", Outcome::Send),
        ];
        assert_eq!(compute_monthly_summary(&scale, &climbs).max_grade, "6c");
    }

    #[test]
    fn unknown_grades_are_ignored_for_max() {
        let scale = GradeScale::default();
        let climbs = vec![boulder("6a", Outcome::Send), boulder("V5", Outcome::Send)];
        let summary = compute_monthly_summary(&scale, &climbs);
        assert_eq!(summary.max_grade, "6a");
        assert_eq!(summary.total_climbs, 2);

        let only_unknown = vec![boulder("V5", Outcome::Send)];
        assert_eq!(compute_monthly_summary(&scale, &only_unknown).max_grade, "5c");
    }

    #[test]
    fn success_rate_rounds() {
        let scale = GradeScale::default();
        let climbs = vec![
            boulder("6a", Outcome::Send),
            boulder("6a", Outcome::Attempt),
            boulder("6a", Outcome::Attempt),
        ];
        assert_eq!(compute_monthly_summary(&scale, &climbs).success_rate, 33);

        let climbs = vec![
            boulder("6a", Outcome::Flash),
            boulder("6a", Outcome::Send),
            boulder("6a", Outcome::Project),
        ];
        assert_eq!(compute_monthly_summary(&scale, &climbs).success_rate, 67);
    }

    #[test]
    fn small_route_types_are_filtered() {
        let scale = GradeScale::default();
        let mut climbs: Vec<Climb> = (0..20).map(|_| boulder("6a", Outcome::Send)).collect();
        climbs.push(climb("6a", "Auto Belay", Outcome::Send, "2025-06-11"));

        let summary = compute_monthly_summary(&scale, &climbs);
        assert_eq!(summary.total_climbs, 21);
        assert_eq!(
            summary.route_type_breakdown,
            vec![RouteTypeShare {
                route_type: "Boulder".to_string(),
                count: 20,
                percentage: 95,
            }]
        );
    }

    #[test]
    fn exactly_five_percent_is_kept() {
        let scale = GradeScale::default();
        let mut climbs: Vec<Climb> = (0..19).map(|_| boulder("6a", Outcome::Send)).collect();
        climbs.push(climb("6a", "Lead", Outcome::Send, "2025-06-11"));

        let summary = compute_monthly_summary(&scale, &climbs);
        assert_eq!(summary.route_type_breakdown.len(), 2);
        assert_eq!(summary.route_type_breakdown[1].route_type, "Lead");
        assert_eq!(summary.route_type_breakdown[1].percentage, 5);
    }

    #[test]
    fn breakdown_sorted_by_count() {
        let scale = GradeScale::default();
        let climbs = vec![
            climb("6a", "Lead", Outcome::Send, "2025-06-01"),
            climb("6a", "Top Rope", Outcome::Send, "2025-06-01"),
            climb("6a", "Top Rope", Outcome::Send, "2025-06-02"),
            climb("6a", "Top Rope", Outcome::Send, "2025-06-03"),
            climb("6a", "Boulder", Outcome::Send, "2025-06-03"),
            climb("6a", "Boulder", Outcome::Send, "2025-06-04"),
        ];
        let order: Vec<_> = compute_monthly_summary(&scale, &climbs)
            .route_type_breakdown
            .into_iter()
            .map(|s| (s.route_type, s.count, s.percentage))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Top Rope".to_string(), 3, 50),
                ("Boulder".to_string(), 2, 33),
                ("Lead".to_string(), 1, 17),
            ]
        );
    }

    #[test]
    fn two_climb_june_scenario() {
        let scale = GradeScale::default();
        let climbs = vec![
            climb("6a", "Boulder", Outcome::Send, "2025-06-02"),
            climb("6b", "Lead", Outcome::Project, "2025-06-04"),
        ];
        let summary = compute_monthly_summary(&scale, &climbs);
        assert_eq!(
            summary,
            MonthlySummary {
                total_climbs: 2,
                max_grade: "6b".to_string(),
                success_rate: 50,
                route_type_breakdown: vec![
                    RouteTypeShare {
                        route_type: "Boulder".to_string(),
                        count: 1,
                        percentage: 50,
                    },
                    RouteTypeShare {
                        route_type: "Lead".to_string(),
                        count: 1,
                        percentage: 50,
                    },
                ],
            }
        );

        // order of input does not change the result
        let reversed: Vec<Climb> = climbs.into_iter().rev().collect();
        assert_eq!(compute_monthly_summary(&scale, &reversed), summary);
    }
}
