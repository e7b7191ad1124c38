use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    /// Cached weekly streak, rewritten after every climb mutation.
    pub current_streak: u32,
    pub last_climb_date: Option<NaiveDate>,
    pub created_at: Option<String>,
}

/// Default display name: the local part of the e-mail address.
pub fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_local_part() {
        assert_eq!(name_from_email("alex.honnold@example.com"), "alex.honnold");
        assert_eq!(name_from_email("nobody"), "nobody");
    }
}
