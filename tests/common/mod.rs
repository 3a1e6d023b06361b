// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use pocketbook::application::{FinanceTracker, MemoryNotifier};

pub type TestTracker = FinanceTracker<MemoryNotifier>;

/// Helper to create a tracker that records notifications in memory
pub fn test_tracker() -> TestTracker {
    FinanceTracker::new(MemoryNotifier::new())
}

/// Test fixture: Standard user setup
pub struct StandardUsers;

impl StandardUsers {
    /// Register Alice as "u1"
    pub fn alice(tracker: &mut TestTracker) -> Result<()> {
        tracker.register("u1", "a@b.com", "Alice")?;
        Ok(())
    }

    /// Register Alice ("u1") and Bob ("u2")
    pub fn alice_and_bob(tracker: &mut TestTracker) -> Result<()> {
        Self::alice(tracker)?;
        tracker.register("u2", "bob@example.com", "Bob")?;
        Ok(())
    }

    /// Record a list of (amount, category) transactions for a user
    pub fn spend(tracker: &mut TestTracker, user_id: &str, items: &[(i64, &str)]) -> Result<()> {
        for (amount, category) in items {
            tracker.record_transaction(user_id, *amount, *category)?;
        }
        Ok(())
    }
}
