use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{AccountSession, SessionId};
use crate::domain::{AccountState, format_amount};

/// Output formats for account snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Human-readable, the way the account screen shows it
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time copy of a session's account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: String,
    pub session_id: SessionId,
    pub session_started_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    pub dispatch_count: u64,
    pub state: AccountState,
}

/// Render the balance and loan lines the way the account screen shows them.
pub fn render_text(state: &AccountState) -> String {
    format!(
        "Balance: {}\nLoan: {}\nStatus: {}\n",
        format_amount(state.balance),
        format_amount(state.loan),
        if state.is_active { "open" } else { "closed" }
    )
}

/// Exporter for writing a session's account to various formats
pub struct Exporter<'a> {
    session: &'a AccountSession,
}

impl<'a> Exporter<'a> {
    pub fn new(session: &'a AccountSession) -> Self {
        Self { session }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            session_id: self.session.id(),
            session_started_at: self.session.started_at(),
            exported_at: Utc::now(),
            dispatch_count: self.session.dispatch_count(),
            state: *self.session.state(),
        }
    }

    /// Export in the requested format
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<StateSnapshot> {
        match format {
            ExportFormat::Text => self.export_text(writer),
            ExportFormat::Json => self.export_json(writer),
            ExportFormat::Csv => self.export_csv(writer),
        }
    }

    /// Export the snapshot as pretty JSON
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<StateSnapshot> {
        let snapshot = self.snapshot();

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }

    /// Export the snapshot as a header row plus one data row
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<StateSnapshot> {
        let snapshot = self.snapshot();
        let state = &snapshot.state;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "session_id",
            "exported_at",
            "balance",
            "loan",
            "is_active",
            "deposit_amount",
            "withdraw_amount",
            "requested_loan_amount",
            "loan_payment_amount",
        ])?;

        csv_writer.write_record(&[
            snapshot.session_id.to_string(),
            snapshot.exported_at.to_rfc3339(),
            state.balance.to_string(),
            state.loan.to_string(),
            state.is_active.to_string(),
            state.deposit_amount.to_string(),
            state.withdraw_amount.to_string(),
            state.requested_loan_amount.to_string(),
            state.loan_payment_amount.to_string(),
        ])?;

        csv_writer.flush()?;
        Ok(snapshot)
    }

    pub fn export_text<W: Write>(&self, mut writer: W) -> Result<StateSnapshot> {
        let snapshot = self.snapshot();
        writer.write_all(render_text(&snapshot.state).as_bytes())?;
        writer.flush()?;
        Ok(snapshot)
    }
}
