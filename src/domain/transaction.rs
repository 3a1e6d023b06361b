use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{cents_serde, sum_cents, Cents, UserId};

pub type TransactionId = Uuid;

/// A single spending record owned by one user. Transactions are immutable
/// once recorded; the owning list is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    /// Amount in cents. Sign is not constrained. Serialized as `"amount"`
    /// in decimal form.
    #[serde(rename = "amount", with = "cents_serde")]
    pub amount_cents: Cents,
    /// Free-form category (e.g., "groceries")
    pub category: String,
    /// Wall-clock time at which the transaction was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(user_id: UserId, amount_cents: Cents, category: impl Into<String>) -> Self {
        Self::at(user_id, amount_cents, category, Utc::now())
    }

    pub fn at(
        user_id: UserId,
        amount_cents: Cents,
        category: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount_cents,
            category: category.into(),
            timestamp,
        }
    }
}

/// Sum of all amounts. No filtering by date or sign.
pub fn total_spent<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Cents {
    sum_cents(transactions.into_iter().map(|t| t.amount_cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_spent_includes_negative_amounts() {
        let user: UserId = "u1".into();
        let txs = vec![
            Transaction::new(user.clone(), 5000, "food"),
            Transaction::new(user.clone(), -1500, "refund"),
            Transaction::new(user, 250, ""),
        ];
        assert_eq!(total_spent(&txs), 3750);
    }

    #[test]
    fn test_total_spent_empty_is_zero() {
        assert_eq!(total_spent(&Vec::new()), 0);
    }

    #[test]
    fn test_total_spent_near_limit_ignores_order() {
        let user: UserId = "u1".into();
        let big = Transaction::new(user.clone(), i64::MAX, "a");
        let up = Transaction::new(user.clone(), 1, "b");
        let down = Transaction::new(user, -1, "c");

        let orders = [
            vec![&big, &up, &down],
            vec![&down, &up, &big],
            vec![&up, &big, &down],
        ];
        for order in orders {
            assert_eq!(total_spent(order), i64::MAX);
        }
    }

    #[test]
    fn test_timestamp_serializes_as_rfc3339() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T10:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let tx = Transaction::at("u1".into(), 100, "coffee", ts);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["timestamp"], "2024-03-01T10:15:00Z");
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["amount"], "1.00");
    }
}
