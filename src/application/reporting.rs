use serde::{Deserialize, Serialize};

use crate::domain::{cents_serde, Cents, Limit, Transaction};

/// Spending summary for one user. Money fields serialize as decimal
/// strings, the same text the CLI confirmations print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(with = "cents_serde")]
    pub total_spent: Cents,
    pub budget: Limit,
    pub savings_goal: Limit,
    pub transactions: Vec<Transaction>,
}

/// Outcome of a budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCheck {
    #[serde(with = "cents_serde")]
    pub total_spent: Cents,
    /// Limit compared against (0 when no budget was set)
    #[serde(with = "cents_serde")]
    pub limit: Cents,
    pub exceeded: bool,
}

/// Outcome of a savings goal check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCheck {
    #[serde(with = "cents_serde")]
    pub total_spent: Cents,
    /// Goal compared against (0 when no goal was set)
    #[serde(with = "cents_serde")]
    pub goal: Cents,
    pub achieved: bool,
    /// Reward point balance after the check
    pub reward_points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "cents_serde")]
    pub total: Cents,
    pub count: usize,
}
