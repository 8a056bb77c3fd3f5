use chrono::{DateTime, Utc};

/// A visitor token and its counter, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surrogate row id. Internal only.
    pub id: i64,
    pub value: String,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_visit_at: Option<DateTime<Utc>>,
}

/// Outcome of counting a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    /// The visit was counted; holds the post-increment count.
    Counted(u64),
    /// No token with that value exists. Nothing was changed.
    UnknownToken,
}

impl VisitResult {
    pub fn count(self) -> Option<u64> {
        match self {
            VisitResult::Counted(n) => Some(n),
            VisitResult::UnknownToken => None,
        }
    }
}

/// First 8 characters of a token, for log lines.
pub fn redact(token: &str) -> &str {
    match token.char_indices().nth(8) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_truncates_long_tokens() {
        assert_eq!(redact("0123456789abcdef"), "01234567");
    }

    #[test]
    fn redact_keeps_short_and_multibyte_tokens_intact() {
        assert_eq!(redact("abc"), "abc");
        assert_eq!(redact(""), "");
        assert_eq!(redact("ééééééééé"), "éééééééé");
    }

    #[test]
    fn count_only_for_counted() {
        assert_eq!(VisitResult::Counted(7).count(), Some(7));
        assert_eq!(VisitResult::UnknownToken.count(), None);
    }
}
