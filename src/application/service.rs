use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::domain::{
    format_cents, sum_cents, total_spent, Cents, Limit, Transaction, User, UserId,
    BUDGET_FRIENDLY_SHOPS, GOAL_REWARD_POINTS,
};
use crate::storage::Repository;

use super::{
    AppError, BudgetCheck, CategoryTotal, ConsoleNotifier, GoalCheck, Notification,
    NotificationKind, Notifier, Report,
};

/// Application service providing every tracker operation.
/// This is the primary interface for any client (CLI, script replay, tests).
///
/// All state lives in the value itself; there is no shared global instance.
/// Operations report through `tracing` and their return values; the stdout
/// confirmation lines are printed by the CLI (see `cli::confirmation`).
pub struct FinanceTracker<N: Notifier = ConsoleNotifier> {
    repo: Repository,
    notifier: N,
    config: TrackerConfig,
}

impl<N: Notifier> FinanceTracker<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_config(TrackerConfig::default(), notifier)
    }

    pub fn with_config(config: TrackerConfig, notifier: N) -> Self {
        Self {
            repo: Repository::new(),
            notifier,
            config,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ========================
    // User operations
    // ========================

    /// Register a new user.
    pub fn register(
        &mut self,
        user_id: &str,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<User, AppError> {
        if self.repo.contains_user(user_id) {
            return Err(AppError::DuplicateUser(user_id.to_string()));
        }

        let user = User::new(UserId::new(user_id), email, name);
        self.repo.insert_user(user.clone());
        info!(user_id, email = %user.email, "registered user");
        Ok(user)
    }

    /// Get a user by id.
    pub fn get_user(&self, user_id: &str) -> Result<&User, AppError> {
        self.repo
            .get_user(user_id)
            .ok_or_else(|| AppError::user_not_found(user_id))
    }

    /// List all users, ordered by id.
    pub fn list_users(&self) -> Vec<&User> {
        self.repo.list_users()
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a transaction stamped with the current time.
    pub fn record_transaction(
        &mut self,
        user_id: &str,
        amount_cents: Cents,
        category: impl Into<String>,
    ) -> Result<Transaction, AppError> {
        let user = self.get_user(user_id)?;
        let transaction = Transaction::new(user.id.clone(), amount_cents, category);

        self.repo.append_transaction(transaction.clone());
        info!(
            user_id,
            amount = %format_cents(amount_cents),
            category = %transaction.category,
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Transactions in the order they were recorded.
    ///
    /// Looks in the transaction index rather than the user registry, so a
    /// registered user who has not recorded anything yet is reported as
    /// `UserNotFound`, same as an unknown id.
    pub fn list_transactions(&self, user_id: &str) -> Result<&[Transaction], AppError> {
        self.repo
            .transactions_for(user_id)
            .ok_or_else(|| AppError::user_not_found(user_id))
    }

    /// Lifetime sum of a user's transaction amounts.
    pub fn total_spent(&self, user_id: &str) -> Result<Cents, AppError> {
        self.get_user(user_id)?;
        Ok(self.lifetime_total(user_id))
    }

    /// Lifetime spending grouped by category, ordered by category name.
    pub fn spending_by_category(&self, user_id: &str) -> Result<Vec<CategoryTotal>, AppError> {
        self.get_user(user_id)?;

        let mut groups: BTreeMap<&str, Vec<Cents>> = BTreeMap::new();
        for tx in self.repo.transactions_for(user_id).unwrap_or_default() {
            groups
                .entry(tx.category.as_str())
                .or_default()
                .push(tx.amount_cents);
        }

        Ok(groups
            .into_iter()
            .map(|(category, amounts)| CategoryTotal {
                category: category.to_string(),
                count: amounts.len(),
                total: sum_cents(amounts),
            })
            .collect())
    }

    // ========================
    // Budget operations
    // ========================

    /// Set (or replace) the user's budget limit.
    pub fn set_budget(&mut self, user_id: &str, limit: Cents) -> Result<(), AppError> {
        let id = self.get_user(user_id)?.id.clone();
        self.repo.set_budget(id, limit);
        info!(user_id, limit = %format_cents(limit), "budget set");
        Ok(())
    }

    /// Compare lifetime spending with the budget (0 if none was set) and
    /// alert the user when spending is strictly above it.
    pub fn check_budget(&mut self, user_id: &str) -> Result<BudgetCheck, AppError> {
        self.get_user(user_id)?;

        let total_spent = self.lifetime_total(user_id);
        let limit = Limit::from(self.repo.budget(user_id)).threshold();
        let exceeded = total_spent > limit;
        debug!(user_id, total_spent, limit, exceeded, "budget check");

        if exceeded {
            let message = format!(
                "You have exceeded your budget! Total spent: {}, budget limit: {}.",
                format_cents(total_spent),
                format_cents(limit)
            );
            warn!(user_id, total_spent, limit, "budget exceeded");
            self.dispatch(user_id, NotificationKind::BudgetExceeded, message)?;
        }

        Ok(BudgetCheck {
            total_spent,
            limit,
            exceeded,
        })
    }

    // ========================
    // Savings goal operations
    // ========================

    /// Set (or replace) the user's savings goal.
    pub fn set_savings_goal(&mut self, user_id: &str, goal: Cents) -> Result<(), AppError> {
        let id = self.get_user(user_id)?.id.clone();
        self.repo.set_savings_goal(id, goal);
        info!(user_id, goal = %format_cents(goal), "savings goal set");
        Ok(())
    }

    /// Reward the user when lifetime spending is at or below the savings goal
    /// (0 if none was set).
    ///
    /// Every successful check awards points again; there is no record of a
    /// goal having already been rewarded.
    pub fn check_savings_goal(&mut self, user_id: &str) -> Result<GoalCheck, AppError> {
        self.get_user(user_id)?;

        let total_spent = self.lifetime_total(user_id);
        let goal = Limit::from(self.repo.savings_goal(user_id)).threshold();
        let achieved = total_spent <= goal;
        debug!(user_id, total_spent, goal, achieved, "savings goal check");

        let user = self
            .repo
            .get_user_mut(user_id)
            .ok_or_else(|| AppError::user_not_found(user_id))?;
        let reward_points = if achieved {
            user.award_points(GOAL_REWARD_POINTS)
        } else {
            user.reward_points
        };

        if achieved {
            let message = format!(
                "Congratulations! You met your savings goal and earned {} reward points.",
                GOAL_REWARD_POINTS
            );
            info!(user_id, reward_points, "savings goal achieved");
            self.dispatch(user_id, NotificationKind::GoalAchieved, message)?;
        }

        Ok(GoalCheck {
            total_spent,
            goal,
            achieved,
            reward_points,
        })
    }

    // ========================
    // Notifications and reports
    // ========================

    /// Send a free-form notification to the user's email address.
    pub fn notify(
        &mut self,
        user_id: &str,
        message: impl Into<String>,
    ) -> Result<Notification, AppError> {
        self.dispatch(user_id, NotificationKind::Message, message.into())
    }

    /// Fixed list of budget-friendly shops. Needs no tracker state.
    pub fn list_budget_friendly_shops() -> &'static [&'static str] {
        &BUDGET_FRIENDLY_SHOPS
    }

    /// Build the spending report for a user.
    pub fn generate_report(&self, user_id: &str) -> Result<Report, AppError> {
        self.get_user(user_id)?;

        let transactions = self
            .repo
            .transactions_for(user_id)
            .map(<[Transaction]>::to_vec)
            .unwrap_or_default();

        Ok(Report {
            total_spent: total_spent(&transactions),
            budget: Limit::from(self.repo.budget(user_id)),
            savings_goal: Limit::from(self.repo.savings_goal(user_id)),
            transactions,
        })
    }

    fn lifetime_total(&self, user_id: &str) -> Cents {
        total_spent(self.repo.transactions_for(user_id).unwrap_or_default())
    }

    fn dispatch(
        &mut self,
        user_id: &str,
        kind: NotificationKind,
        message: String,
    ) -> Result<Notification, AppError> {
        let user = self.get_user(user_id)?;
        let notification = Notification {
            kind,
            from: self.config.sender_address.clone(),
            to: user.email.clone(),
            message,
        };

        debug!(user_id, to = %notification.to, ?kind, "sending notification");
        self.notifier.send(&notification);
        Ok(notification)
    }
}
