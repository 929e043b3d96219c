use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in learner. Absent means logged out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "joinDate")]
    pub join_date: DateTime<Utc>,
}

impl User {
    /// The fixed demo account handed out by the simulated login.
    pub fn demo(join_date: DateTime<Utc>) -> Self {
        Self {
            id: "user-123".to_string(),
            name: "AI Learner".to_string(),
            email: "learner@example.com".to_string(),
            join_date,
        }
    }
}
