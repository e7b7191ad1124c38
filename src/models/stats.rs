use serde::{Deserialize, Serialize};

use crate::models::YearMonth;

/// Counts for a single day of climbing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStats {
    pub climbs: u32,
    pub flashes: u32,
    pub sends: u32,
    pub projects: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTypeShare {
    pub route_type: String,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_climbs: u32,
    pub max_grade: String,
    /// 0–100, rounded half-up.
    pub success_rate: u32,
    pub route_type_breakdown: Vec<RouteTypeShare>,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.total_climbs == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeProgressionPoint {
    pub year: i32,
    pub month: u32,
    pub max_grade: String,
    pub grade_value: u32,
}

impl GradeProgressionPoint {
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Progression series plus the months whose aggregation failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeProgression {
    pub points: Vec<GradeProgressionPoint>,
    pub skipped: Vec<YearMonth>,
}
