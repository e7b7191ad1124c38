use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::StatsError;

pub const DEFAULT_GRADES: [&str; 10] = [
    "5c", "6a", "6a+", "6b", "6b+", "6c", "6c+", "7a", "7b", "7c",
];

/// Ordered difficulty scale, weakest first.
///
/// Shared configuration: every ranking in the stats engine goes through one
/// `GradeScale` value rather than a literal list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct GradeScale {
    grades: Vec<String>,
}

impl GradeScale {
    pub fn new<I, S>(grades: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grades: Vec<String> = grades.into_iter().map(Into::into).collect();
        if grades.is_empty() {
            return Err(StatsError::EmptyGradeScale);
        }
        let mut seen = HashSet::new();
        for g in &grades {
            if !seen.insert(g.as_str()) {
                return Err(StatsError::DuplicateGrade(g.clone()));
            }
        }
        Ok(Self { grades })
    }

    /// Zero-based position on the scale, `None` for grades not on it.
    pub fn rank(&self, grade: &str) -> Option<usize> {
        self.grades.iter().position(|g| g == grade)
    }

    /// One-based rank used for charting; `0` when the grade is unknown.
    pub fn value(&self, grade: &str) -> u32 {
        self.rank(grade).map(|r| r as u32 + 1).unwrap_or(0)
    }

    pub fn weakest(&self) -> &str {
        &self.grades[0]
    }

    pub fn contains(&self, grade: &str) -> bool {
        self.rank(grade).is_some()
    }

    pub fn grades(&self) -> &[String] {
        &self.grades
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            grades: DEFAULT_GRADES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for GradeScale {
    type Error = StatsError;

    fn try_from(grades: Vec<String>) -> Result<Self, Self::Error> {
        GradeScale::new(grades)
    }
}

impl From<GradeScale> for Vec<String> {
    fn from(scale: GradeScale) -> Self {
        scale.grades
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_starts_at_5c() {
        let scale = GradeScale::default();
        assert_eq!(scale.weakest(), "5c");
        assert_eq!(scale.len(), 10);
        assert_eq!(scale.rank("6a+"), Some(2));
        assert_eq!(scale.value("7c"), 10);
    }

    #[test]
    fn unknown_grades_have_no_rank() {
        let scale = GradeScale::default();
        assert_eq!(scale.rank("8a"), None);
        assert_eq!(scale.value("8a"), 0);
        assert!(!scale.contains("5a"));
    }

    #[test]
    fn rejects_empty_and_duplicate_scales() {
        assert_eq!(
            GradeScale::new(Vec::<String>::new()),
            Err(StatsError::EmptyGradeScale)
        );
        assert_eq!(
            GradeScale::new(["6a", "6b", "6a"]),
            Err(StatsError::DuplicateGrade("6a".to_string()))
        );
    }

    #[test]
    fn deserializes_through_validation() {
        #[derive(Deserialize)]
        struct Wrapper {
            scale: GradeScale,
        }
        let ok: Wrapper = toml::from_str(r#"scale = ["5a", "5b", "5c"]"#).unwrap();
        assert_eq!(ok.scale.weakest(), "5a");

        let bad = toml::from_str::<Wrapper>(r#"scale = []"#);
        assert!(bad.is_err());
    }
}
