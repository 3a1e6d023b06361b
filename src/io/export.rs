use anyhow::Result;
use std::io::Write;

use crate::application::{FinanceTracker, Notifier, Report};
use crate::domain::format_cents;

/// Exporter for writing tracker data out in CSV or JSON
pub struct Exporter<'a, N: Notifier> {
    tracker: &'a FinanceTracker<N>,
}

impl<'a, N: Notifier> Exporter<'a, N> {
    pub fn new(tracker: &'a FinanceTracker<N>) -> Self {
        Self { tracker }
    }

    /// Export a user's transactions to CSV, in recording order.
    /// A registered user with no transactions gets just the header.
    pub fn export_transactions_csv<W: Write>(&self, user_id: &str, writer: W) -> Result<usize> {
        let report = self.tracker.generate_report(user_id)?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "timestamp", "category", "amount"])?;

        for tx in &report.transactions {
            csv_writer.write_record(&[
                tx.id.to_string(),
                tx.timestamp.to_rfc3339(),
                tx.category.clone(),
                format_cents(tx.amount_cents),
            ])?;
        }

        csv_writer.flush()?;
        Ok(report.transactions.len())
    }

    /// Export a user's report as pretty-printed JSON.
    pub fn export_report_json<W: Write>(&self, user_id: &str, mut writer: W) -> Result<Report> {
        let report = self.tracker.generate_report(user_id)?;
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        Ok(report)
    }
}
