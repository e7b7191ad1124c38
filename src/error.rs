use thiserror::Error;

/// Failures building the inputs of the stats engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("grade scale must contain at least one grade")]
    EmptyGradeScale,
    #[error("grade '{0}' appears more than once in the grade scale")]
    DuplicateGrade(String),
}

/// Ownership and identity failures raised by the repositories.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid user id {0}")]
    InvalidUser(i64),
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("climb {id} not found for user {user_id}")]
    ClimbNotFound { id: i64, user_id: i64 },
    #[error("no active user, run `cragbook login <email>` first")]
    NoActiveUser,
}
