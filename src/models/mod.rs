pub mod climb;
pub mod grade;
pub mod month;
pub mod stats;
pub mod user;

pub use climb::{Climb, ClimbPatch, NewClimb, Outcome, RouteType};
pub use grade::GradeScale;
pub use month::YearMonth;
pub use stats::{GradeProgression, GradeProgressionPoint, MonthlySummary, RouteTypeShare, TodayStats};
pub use user::User;
