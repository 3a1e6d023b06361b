use std::collections::HashMap;

use crate::domain::{Cents, Transaction, User, UserId};

/// In-memory store for users, their transactions, budgets and savings goals.
///
/// Transactions live in their own index keyed by user. A user only gets an
/// entry there once a first transaction is recorded.
#[derive(Debug, Default)]
pub struct Repository {
    users: HashMap<UserId, User>,
    transactions: HashMap<UserId, Vec<Transaction>>,
    budgets: HashMap<UserId, Cents>,
    savings_goals: HashMap<UserId, Cents>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // User operations
    // ========================

    pub fn contains_user(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Insert a user. Returns false (and leaves the stored user untouched)
    /// if the id is already taken.
    pub fn insert_user(&mut self, user: User) -> bool {
        if self.users.contains_key(&user.id) {
            return false;
        }
        self.users.insert(user.id.clone(), user);
        true
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn get_user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    /// All users ordered by id.
    pub fn list_users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    // ========================
    // Transaction operations
    // ========================

    pub fn append_transaction(&mut self, transaction: Transaction) {
        self.transactions
            .entry(transaction.user_id.clone())
            .or_default()
            .push(transaction);
    }

    /// Transactions for a user in insertion order, or `None` if the user has
    /// never recorded one.
    pub fn transactions_for(&self, id: &str) -> Option<&[Transaction]> {
        self.transactions.get(id).map(Vec::as_slice)
    }

    // ========================
    // Budget and goal operations
    // ========================

    pub fn set_budget(&mut self, id: UserId, limit: Cents) {
        self.budgets.insert(id, limit);
    }

    pub fn budget(&self, id: &str) -> Option<Cents> {
        self.budgets.get(id).copied()
    }

    pub fn set_savings_goal(&mut self, id: UserId, goal: Cents) {
        self.savings_goals.insert(id, goal);
    }

    pub fn savings_goal(&self, id: &str) -> Option<Cents> {
        self.savings_goals.get(id).copied()
    }
}
