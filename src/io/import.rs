use csv::StringRecord;
use std::io::Read;
use tracing::{debug, warn};

use crate::application::{
    AppError, BudgetCheck, FinanceTracker, GoalCheck, Notification, Notifier,
};
use crate::domain::{parse_cents, Cents, Transaction, User};

/// One line of a tracker script.
///
/// Scripts are header-less CSV; the first field names the command:
///
/// ```text
/// register,u1,a@b.com,Alice
/// budget,u1,500
/// goal,u1,1000
/// transaction,u1,50.00,groceries
/// check-budget,u1
/// check-goal,u1
/// notify,u1,Remember to review your spending
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Register {
        user_id: String,
        email: String,
        name: String,
    },
    Transaction {
        user_id: String,
        amount_cents: Cents,
        category: String,
    },
    Budget {
        user_id: String,
        limit: Cents,
    },
    Goal {
        user_id: String,
        goal: Cents,
    },
    CheckBudget {
        user_id: String,
    },
    CheckGoal {
        user_id: String,
    },
    Notify {
        user_id: String,
        message: String,
    },
}

impl ScriptCommand {
    pub fn parse(record: &StringRecord) -> Result<Self, String> {
        let field = |idx: usize, name: &str| -> Result<String, String> {
            record
                .get(idx)
                .map(str::to_string)
                .ok_or_else(|| format!("missing field '{}'", name))
        };
        let amount = |idx: usize, name: &str| -> Result<Cents, String> {
            let raw = field(idx, name)?;
            parse_cents(&raw).map_err(|e| format!("{}: {}", name, e))
        };

        let command = record.get(0).unwrap_or("").to_lowercase();
        let parsed = match command.as_str() {
            "register" => ScriptCommand::Register {
                user_id: field(1, "user_id")?,
                email: field(2, "email")?,
                name: field(3, "name")?,
            },
            "transaction" => ScriptCommand::Transaction {
                user_id: field(1, "user_id")?,
                amount_cents: amount(2, "amount")?,
                // Category is free-form and may be left out entirely
                category: record.get(3).unwrap_or("").to_string(),
            },
            "budget" => ScriptCommand::Budget {
                user_id: field(1, "user_id")?,
                limit: amount(2, "limit")?,
            },
            "goal" => ScriptCommand::Goal {
                user_id: field(1, "user_id")?,
                goal: amount(2, "goal")?,
            },
            "check-budget" => ScriptCommand::CheckBudget {
                user_id: field(1, "user_id")?,
            },
            "check-goal" => ScriptCommand::CheckGoal {
                user_id: field(1, "user_id")?,
            },
            "notify" => ScriptCommand::Notify {
                user_id: field(1, "user_id")?,
                message: field(2, "message")?,
            },
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{}'", other)),
        };

        Ok(parsed)
    }
}

/// What an executed script line produced
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Registered(User),
    Recorded(Transaction),
    BudgetSet { user_id: String, limit: Cents },
    GoalSet { user_id: String, goal: Cents },
    BudgetChecked { user_id: String, check: BudgetCheck },
    GoalChecked { user_id: String, check: GoalCheck },
    Notified(Notification),
}

/// Error that occurred on one script line
#[derive(Debug, Clone)]
pub struct ReplayError {
    pub line: usize,
    pub error: String,
}

/// Result of a replay
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    pub executed: usize,
    pub outcomes: Vec<StepOutcome>,
    pub errors: Vec<ReplayError>,
}

/// Options for replaying a script
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Abort on the first failing line instead of collecting errors
    pub stop_on_error: bool,
}

/// Feeds script commands into a tracker
pub struct Importer<'a, N: Notifier> {
    tracker: &'a mut FinanceTracker<N>,
}

impl<'a, N: Notifier> Importer<'a, N> {
    pub fn new(tracker: &'a mut FinanceTracker<N>) -> Self {
        Self { tracker }
    }

    /// Replay a CSV script against the tracker.
    pub fn replay<R: Read>(
        &mut self,
        reader: R,
        options: ReplayOptions,
    ) -> Result<ReplayResult, AppError> {
        self.replay_with(reader, options, |_| {})
    }

    /// Like [`Importer::replay`], calling `on_step` right after each line
    /// succeeds.
    pub fn replay_with<R: Read, F: FnMut(&StepOutcome)>(
        &mut self,
        reader: R,
        options: ReplayOptions,
        mut on_step: F,
    ) -> Result<ReplayResult, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut result = ReplayResult::default();

        for (idx, record) in csv_reader.records().enumerate() {
            let (line, step) = match record {
                Ok(record) => {
                    let line = record
                        .position()
                        .map(|p| p.line() as usize)
                        .unwrap_or(idx + 1);
                    let step = ScriptCommand::parse(&record)
                        .and_then(|cmd| self.execute(cmd).map_err(|e| e.to_string()));
                    (line, step)
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
                    (line, Err(format!("CSV parse error: {}", e)))
                }
            };

            match step {
                Ok(outcome) => {
                    debug!(line, "script line executed");
                    on_step(&outcome);
                    result.executed += 1;
                    result.outcomes.push(outcome);
                }
                Err(message) if options.stop_on_error => {
                    return Err(AppError::Import { line, message });
                }
                Err(error) => {
                    warn!(line, %error, "script line failed");
                    result.errors.push(ReplayError { line, error });
                }
            }
        }

        Ok(result)
    }

    fn execute(&mut self, command: ScriptCommand) -> Result<StepOutcome, AppError> {
        let outcome = match command {
            ScriptCommand::Register {
                user_id,
                email,
                name,
            } => StepOutcome::Registered(self.tracker.register(&user_id, email, name)?),
            ScriptCommand::Transaction {
                user_id,
                amount_cents,
                category,
            } => StepOutcome::Recorded(self.tracker.record_transaction(
                &user_id,
                amount_cents,
                category,
            )?),
            ScriptCommand::Budget { user_id, limit } => {
                self.tracker.set_budget(&user_id, limit)?;
                StepOutcome::BudgetSet { user_id, limit }
            }
            ScriptCommand::Goal { user_id, goal } => {
                self.tracker.set_savings_goal(&user_id, goal)?;
                StepOutcome::GoalSet { user_id, goal }
            }
            ScriptCommand::CheckBudget { user_id } => {
                let check = self.tracker.check_budget(&user_id)?;
                StepOutcome::BudgetChecked { user_id, check }
            }
            ScriptCommand::CheckGoal { user_id } => {
                let check = self.tracker.check_savings_goal(&user_id)?;
                StepOutcome::GoalChecked { user_id, check }
            }
            ScriptCommand::Notify { user_id, message } => {
                StepOutcome::Notified(self.tracker.notify(&user_id, message)?)
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_transaction_amount() {
        let cmd = ScriptCommand::parse(&record(&["transaction", "u1", "12.5", "food"])).unwrap();
        assert_eq!(
            cmd,
            ScriptCommand::Transaction {
                user_id: "u1".into(),
                amount_cents: 1250,
                category: "food".into(),
            }
        );
    }

    #[test]
    fn test_parse_transaction_without_category() {
        let cmd = ScriptCommand::parse(&record(&["transaction", "u1", "3"])).unwrap();
        assert!(matches!(cmd, ScriptCommand::Transaction { category, .. } if category.is_empty()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(
            ScriptCommand::parse(&record(&["register", "u1"]))
                .unwrap_err()
                .contains("email")
        );
        assert!(
            ScriptCommand::parse(&record(&["budget", "u1", "lots"]))
                .unwrap_err()
                .contains("limit")
        );
        assert!(
            ScriptCommand::parse(&record(&["withdraw", "u1"]))
                .unwrap_err()
                .contains("unknown command")
        );
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        let cmd = ScriptCommand::parse(&record(&["CHECK-GOAL", "u1"])).unwrap();
        assert_eq!(
            cmd,
            ScriptCommand::CheckGoal {
                user_id: "u1".into()
            }
        );
    }
}
