use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Points added to a user each time a savings goal check succeeds.
pub const GOAL_REWARD_POINTS: u64 = 100;

/// Caller-chosen user identifier. Unique within a tracker and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// Message log carried on the user. Tracker operations never write to it;
    /// alerts go through the notifier.
    pub notifications: Vec<String>,
    pub reward_points: u64,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            notifications: Vec::new(),
            reward_points: 0,
            registered_at: Utc::now(),
        }
    }

    pub fn award_points(&mut self, points: u64) -> u64 {
        self.reward_points = self.reward_points.saturating_add(points);
        self.reward_points
    }
}
