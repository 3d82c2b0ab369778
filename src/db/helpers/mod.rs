use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::InteractionKind;

/// Fixed-width UTC timestamp, so stored values sort chronologically as text.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_kind(value: &str) -> Result<InteractionKind> {
    match value {
        "CONVERSATION" => Ok(InteractionKind::Conversation),
        "CALL" => Ok(InteractionKind::Call),
        "REMOVAL" => Ok(InteractionKind::Removal),
        other => Err(anyhow!("unknown interaction type {other}")),
    }
}
