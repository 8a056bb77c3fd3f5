use crate::Database;
use crate::models::{TokenRow, format_timestamp};
use anyhow::Result;
use chrono::{DateTime, Utc};
use happiness_core::Token;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Tokens --

    pub fn insert_token(&self, value: &str, created_at: DateTime<Utc>) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO tokens (value, visit_count, created_at) VALUES (?1, 0, ?2)",
                (value, format_timestamp(created_at)),
            )?;
            Ok(())
        })
    }

    /// Bump the counter and stamp the visit in one statement; the returned
    /// count is the row's value right after this update.
    pub fn increment_visit(&self, value: &str, now: DateTime<Utc>) -> Result<Option<u64>> {
        self.with_conn_mut(|conn| {
            let count: Option<i64> = conn
                .query_row(
                    "UPDATE tokens
                     SET visit_count = visit_count + 1,
                         last_visit_at = MAX(?1, created_at)
                     WHERE value = ?2
                     RETURNING visit_count",
                    (format_timestamp(now), value),
                    |row| row.get(0),
                )
                .optional()?;

            Ok(count.map(u64::try_from).transpose()?)
        })
    }

    pub fn get_token(&self, value: &str) -> Result<Option<Token>> {
        self.with_conn(|conn| query_token(conn, value))
    }
}

fn query_token(conn: &Connection, value: &str) -> Result<Option<Token>> {
    let mut stmt = conn.prepare(
        "SELECT id, value, visit_count, created_at, last_visit_at FROM tokens WHERE value = ?1",
    )?;

    let row = stmt
        .query_row([value], |row| {
            Ok(TokenRow {
                id: row.get(0)?,
                value: row.get(1)?,
                visit_count: row.get(2)?,
                created_at: row.get(3)?,
                last_visit_at: row.get(4)?,
            })
        })
        .optional()?;

    row.map(Token::try_from).transpose()
}
