use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{stdin, stdout, Read};
use std::path::PathBuf;

use crate::application::{ConsoleNotifier, FinanceTracker};
use crate::config::TrackerConfig;
use crate::domain::format_cents;
use crate::io::{Exporter, Importer, ReplayOptions, StepOutcome};

/// Pocketbook - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "pocketbook")]
#[command(about = "An in-memory tracker for spending, budgets and savings goals")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "POCKETBOOK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a sample session and print the resulting report
    Demo,

    /// Replay a CSV script of tracker commands
    Run {
        /// Script file (stdin if omitted)
        script: Option<PathBuf>,

        /// Print this user's data once the script has run
        #[arg(short, long)]
        user: Option<String>,

        /// Output format for --user: json prints the report, csv the transactions
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Abort on the first failing line
        #[arg(long)]
        stop_on_error: bool,
    },

    /// List budget-friendly shops
    Shops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::default(),
        };

        match self.command {
            Commands::Demo => run_demo(config),
            Commands::Run {
                script,
                user,
                format,
                stop_on_error,
            } => run_script(config, script, user, format, stop_on_error),
            Commands::Shops => {
                for shop in FinanceTracker::<ConsoleNotifier>::list_budget_friendly_shops() {
                    println!("{}", shop);
                }
                Ok(())
            }
        }
    }
}

fn run_demo(config: TrackerConfig) -> Result<()> {
    let mut tracker = FinanceTracker::with_config(config, ConsoleNotifier);

    let user = tracker.register("u1", "a@b.com", "Alice")?;
    print_outcome(&StepOutcome::Registered(user));

    tracker.set_budget("u1", 50000)?;
    print_outcome(&StepOutcome::BudgetSet {
        user_id: "u1".into(),
        limit: 50000,
    });

    tracker.set_savings_goal("u1", 100000)?;
    print_outcome(&StepOutcome::GoalSet {
        user_id: "u1".into(),
        goal: 100000,
    });

    for (amount, category) in [(5000, "groceries"), (6000, "transport")] {
        let tx = tracker.record_transaction("u1", amount, category)?;
        print_outcome(&StepOutcome::Recorded(tx));
    }

    let check = tracker.check_budget("u1")?;
    print_outcome(&StepOutcome::BudgetChecked {
        user_id: "u1".into(),
        check,
    });

    let check = tracker.check_savings_goal("u1")?;
    print_outcome(&StepOutcome::GoalChecked {
        user_id: "u1".into(),
        check,
    });

    println!();
    let shops = FinanceTracker::<ConsoleNotifier>::list_budget_friendly_shops();
    println!("Budget-friendly shops: {}", shops.join(", "));
    println!();

    Exporter::new(&tracker).export_report_json("u1", stdout().lock())?;
    Ok(())
}

fn run_script(
    config: TrackerConfig,
    script: Option<PathBuf>,
    user: Option<String>,
    format: OutputFormat,
    stop_on_error: bool,
) -> Result<()> {
    let input = match &script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let mut tracker = FinanceTracker::with_config(config, ConsoleNotifier);
    let result = Importer::new(&mut tracker).replay_with(
        input.as_bytes(),
        ReplayOptions { stop_on_error },
        print_outcome,
    )?;

    eprintln!("Executed: {}", result.executed);
    if !result.errors.is_empty() {
        eprintln!("Errors:   {}", result.errors.len());
        for error in &result.errors {
            eprintln!("  Line {}: {}", error.line, error.error);
        }
    }

    if let Some(user_id) = user {
        let exporter = Exporter::new(&tracker);
        match format {
            OutputFormat::Json => {
                println!();
                exporter.export_report_json(&user_id, stdout().lock())?;
            }
            OutputFormat::Csv => {
                exporter.export_transactions_csv(&user_id, stdout().lock())?;
            }
        }
    }

    Ok(())
}

/// Print the confirmation line for a completed step. Notifications are
/// printed by the notifier itself.
fn print_outcome(outcome: &StepOutcome) {
    if let Some(line) = confirmation(outcome) {
        println!("{}", line);
    }
}

/// Confirmation text for a completed step, if it has one. Amounts use the
/// same decimal form as the JSON report.
pub fn confirmation(outcome: &StepOutcome) -> Option<String> {
    let line = match outcome {
        StepOutcome::Registered(user) => {
            format!("User {} registered with ID {} <{}>", user.name, user.id, user.email)
        }
        StepOutcome::Recorded(tx) => {
            let record = serde_json::to_string(tx).unwrap_or_else(|_| format!("{:?}", tx));
            format!("Transaction recorded for user {}: {}", tx.user_id, record)
        }
        StepOutcome::BudgetSet { user_id, limit } => {
            format!("Budget set for user {}: {}", user_id, format_cents(*limit))
        }
        StepOutcome::GoalSet { user_id, goal } => {
            format!("Savings goal set for user {}: {}", user_id, format_cents(*goal))
        }
        StepOutcome::BudgetChecked { check, .. } if check.exceeded => return None,
        StepOutcome::BudgetChecked { user_id, check } => format!(
            "User {} is within budget: spent {} of {}",
            user_id,
            format_cents(check.total_spent),
            format_cents(check.limit)
        ),
        StepOutcome::GoalChecked { user_id, check } if check.achieved => {
            format!("User {} now has {} reward points", user_id, check.reward_points)
        }
        StepOutcome::GoalChecked { user_id, check } => format!(
            "User {} is over the savings goal: spent {} of {}",
            user_id,
            format_cents(check.total_spent),
            format_cents(check.goal)
        ),
        StepOutcome::Notified(_) => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{BudgetCheck, MemoryNotifier};

    #[test]
    fn test_confirmation_lines() {
        let outcome = StepOutcome::BudgetSet {
            user_id: "u1".into(),
            limit: 50000,
        };
        assert_eq!(
            confirmation(&outcome).as_deref(),
            Some("Budget set for user u1: 500.00")
        );

        let exceeded = StepOutcome::BudgetChecked {
            user_id: "u1".into(),
            check: BudgetCheck {
                total_spent: 10,
                limit: 0,
                exceeded: true,
            },
        };
        assert_eq!(confirmation(&exceeded), None);
    }

    #[test]
    fn test_recorded_confirmation_matches_report_amount() {
        let mut tracker = FinanceTracker::new(MemoryNotifier::new());
        tracker.register("u1", "a@b.com", "Alice").unwrap();
        let tx = tracker.record_transaction("u1", 5000, "groceries").unwrap();

        let line = confirmation(&StepOutcome::Recorded(tx)).unwrap();
        assert!(line.starts_with("Transaction recorded for user u1: {"));
        assert!(line.contains(r#""amount":"50.00""#));

        let report = serde_json::to_value(tracker.generate_report("u1").unwrap()).unwrap();
        assert_eq!(report["transactions"][0]["amount"], "50.00");
        assert_eq!(report["total_spent"], "50.00");
    }
}
