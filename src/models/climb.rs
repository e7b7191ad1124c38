use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteType {
    Boulder,
    #[serde(rename = "Top Rope")]
    TopRope,
    Lead,
    #[serde(rename = "Auto Belay")]
    AutoBelay,
}

impl RouteType {
    pub fn all() -> Vec<RouteType> {
        vec![
            RouteType::Boulder,
            RouteType::TopRope,
            RouteType::Lead,
            RouteType::AutoBelay,
        ]
    }

    /// Stored and displayed form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Boulder => "Boulder",
            RouteType::TopRope => "Top Rope",
            RouteType::Lead => "Lead",
            RouteType::AutoBelay => "Auto Belay",
        }
    }
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RouteType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "boulder" | "bouldering" => Ok(RouteType::Boulder),
            "toprope" | "tr" => Ok(RouteType::TopRope),
            "lead" => Ok(RouteType::Lead),
            "autobelay" | "auto" => Ok(RouteType::AutoBelay),
            _ => Err(anyhow::anyhow!("Unknown route type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Send,
    Flash,
    Project,
    Attempt,
}

impl Outcome {
    pub fn all() -> Vec<Outcome> {
        vec![Outcome::Send, Outcome::Flash, Outcome::Project, Outcome::Attempt]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Send => "Send",
            Outcome::Flash => "Flash",
            Outcome::Project => "Project",
            Outcome::Attempt => "Attempt",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Send | Outcome::Flash)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "send" | "sent" => Ok(Outcome::Send),
            "flash" => Ok(Outcome::Flash),
            "project" => Ok(Outcome::Project),
            "attempt" => Ok(Outcome::Attempt),
            _ => Err(anyhow::anyhow!("Unknown outcome: {}", s)),
        }
    }
}

/// One logged climb. Route type and outcome stay free labels here: stats
/// tally whatever the store returns, input validation happens at the CLI
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Climb {
    pub id: i64,
    pub user_id: i64,
    pub gym: String,
    pub route_type: String,
    pub grade: String,
    pub outcome: String,
    pub notes: Option<String>,
    pub media_url: Option<String>,
    pub climb_date: NaiveDate,
    pub created_at: Option<String>,
}

impl Climb {
    /// Known outcome, `None` for labels outside the four outcomes.
    pub fn outcome_kind(&self) -> Option<Outcome> {
        Outcome::from_str(&self.outcome).ok()
    }

    /// Unknown outcomes count as attempts that did not go.
    pub fn is_success(&self) -> bool {
        self.outcome_kind().is_some_and(|o| o.is_success())
    }
}

#[derive(Debug, Clone)]
pub struct NewClimb {
    pub gym: String,
    pub route_type: RouteType,
    pub grade: String,
    pub outcome: Outcome,
    pub notes: Option<String>,
    pub media_url: Option<String>,
    pub climb_date: NaiveDate,
}

/// Partial update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ClimbPatch {
    pub gym: Option<String>,
    pub route_type: Option<RouteType>,
    pub grade: Option<String>,
    pub outcome: Option<Outcome>,
    pub notes: Option<String>,
    pub media_url: Option<String>,
    pub climb_date: Option<NaiveDate>,
}

impl ClimbPatch {
    pub fn is_empty(&self) -> bool {
        self.gym.is_none()
            && self.route_type.is_none()
            && self.grade.is_none()
            && self.outcome.is_none()
            && self.notes.is_none()
            && self.media_url.is_none()
            && self.climb_date.is_none()
    }
}
