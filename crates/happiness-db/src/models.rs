//! Database row type for `tokens`. Timestamps are stored as fixed-width
//! RFC 3339 text in UTC, so they also compare correctly as strings.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use happiness_core::Token;

pub struct TokenRow {
    pub id: i64,
    pub value: String,
    pub visit_count: i64,
    pub created_at: String,
    pub last_visit_at: Option<String>,
}

impl TryFrom<TokenRow> for Token {
    type Error = anyhow::Error;

    fn try_from(row: TokenRow) -> Result<Self> {
        Ok(Token {
            id: row.id,
            value: row.value,
            visit_count: u64::try_from(row.visit_count)?,
            created_at: parse_timestamp(&row.created_at)?,
            last_visit_at: row.last_visit_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}
