use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Tokens --

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueTokenResponse {
    pub token: String,
}

/// Read-only snapshot of a token's counter. The surrogate row id is never exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenStatusResponse {
    pub token: String,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_visit_at: Option<DateTime<Utc>>,
}

// -- Pages --

/// Query pairs as they appear in the URL. Repeated keys resolve to their
/// first occurrence.
pub type QueryPairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[derive(Debug, Default)]
pub struct PageQuery {
    pub style: Option<String>,
    pub token: Option<String>,
}

impl PageQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            style: first_value(pairs, "style"),
            token: first_value(pairs, "token"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ErrorPageQuery {
    pub code: Option<String>,
    pub token: Option<String>,
}

impl ErrorPageQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            code: first_value(pairs, "code"),
            token: first_value(pairs, "token"),
        }
    }
}

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
