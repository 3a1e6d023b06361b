//! Outbound notification channel.
//!
//! Nothing is actually delivered: [`ConsoleNotifier`] prints the message and
//! [`MemoryNotifier`] keeps it for later inspection.

use serde::{Deserialize, Serialize};

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BudgetExceeded,
    GoalAchieved,
    Message,
}

impl NotificationKind {
    pub fn subject(&self) -> &'static str {
        match self {
            NotificationKind::BudgetExceeded => "Budget exceeded",
            NotificationKind::GoalAchieved => "Savings goal achieved",
            NotificationKind::Message => "Notification",
        }
    }
}

/// A simulated e-mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub from: String,
    pub to: String,
    pub message: String,
}

impl Notification {
    pub fn subject(&self) -> &'static str {
        self.kind.subject()
    }
}

/// Sink for notifications produced by the tracker.
pub trait Notifier {
    fn send(&mut self, notification: &Notification);
}

/// Writes each notification to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&mut self, notification: &Notification) {
        println!("Sending email to {}", notification.to);
        println!("  From:    {}", notification.from);
        println!("  Subject: {}", notification.subject());
        println!("  Message: {}", notification.message);
    }
}

/// Collects notifications in memory, in the order they were sent.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    sent: Vec<Notification>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Notification] {
        &self.sent
    }

    pub fn sent_to<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Notification> {
        self.sent.iter().filter(move |n| n.to == email)
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.sent.iter().filter(|n| n.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Notifier for MemoryNotifier {
    fn send(&mut self, notification: &Notification) {
        self.sent.push(notification.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send(&mut self, notification: &Notification) {
        (**self).send(notification)
    }
}
