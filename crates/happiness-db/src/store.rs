use chrono::{DateTime, Utc};
use happiness_core::{StorageError, Token, TokenStore};
use rusqlite::ErrorCode;

use crate::Database;

impl TokenStore for Database {
    fn insert(&self, value: &str, created_at: DateTime<Utc>) -> Result<(), StorageError> {
        self.insert_token(value, created_at).map_err(storage_error)
    }

    fn increment_and_fetch(
        &self,
        value: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<u64>, StorageError> {
        self.increment_visit(value, now).map_err(storage_error)
    }

    fn fetch(&self, value: &str) -> Result<Option<Token>, StorageError> {
        self.get_token(value).map_err(storage_error)
    }
}

fn storage_error(e: anyhow::Error) -> StorageError {
    match e.downcast_ref::<rusqlite::Error>() {
        Some(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            StorageError::Duplicate
        }
        _ => StorageError::Unavailable(format!("{:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    use happiness_core::{TokenIssuer, VisitCounter, VisitResult};

    use super::*;

    fn open_file_db() -> (tempfile::TempDir, Arc<Database>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("tokens.db")).unwrap();
        (dir, Arc::new(db))
    }

    #[test]
    fn colliding_value_fails_closed() {
        let db = Database::open_in_memory().unwrap();
        db.insert("t1", Utc::now()).unwrap();

        assert!(matches!(db.insert("t1", Utc::now()), Err(StorageError::Duplicate)));
    }

    #[test]
    fn issue_and_count_against_sqlite() {
        let (_dir, db) = open_file_db();
        let issuer = TokenIssuer::new(db.clone());
        let counter = VisitCounter::new(db.clone());

        let t1 = issuer.issue().unwrap();
        assert_eq!(counter.record_visit(&t1).unwrap(), VisitResult::Counted(1));
        assert_eq!(counter.record_visit(&t1).unwrap(), VisitResult::Counted(2));
        assert_eq!(counter.record_visit("unknown-token").unwrap(), VisitResult::UnknownToken);

        let row = db.fetch(&t1).unwrap().unwrap();
        assert_eq!(row.visit_count, 2);
        assert!(row.last_visit_at.unwrap() >= row.created_at);
    }

    #[test]
    fn independent_counters() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let issuer = TokenIssuer::new(db.clone());
        let counter = VisitCounter::new(db.clone());

        let a = issuer.issue().unwrap();
        let b = issuer.issue().unwrap();
        for _ in 0..3 {
            counter.record_visit(&a).unwrap();
        }
        counter.record_visit(&b).unwrap();

        assert_eq!(db.fetch(&a).unwrap().unwrap().visit_count, 3);
        assert_eq!(db.fetch(&b).unwrap().unwrap().visit_count, 1);
    }

    #[test]
    fn concurrent_visits_on_file_db() {
        const N: u64 = 50;
        let (_dir, db) = open_file_db();
        let token = TokenIssuer::new(db.clone()).issue().unwrap();
        let counter = VisitCounter::new(db.clone());

        let seen: BTreeSet<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..N)
                .map(|_| s.spawn(|| counter.record_visit(&token).unwrap().count().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(seen, (1..=N).collect::<BTreeSet<_>>());
        assert_eq!(db.fetch(&token).unwrap().unwrap().visit_count, N);
    }

    #[test]
    fn reopening_keeps_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert("t1", Utc::now()).unwrap();
            db.increment_and_fetch("t1", Utc::now()).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.increment_and_fetch("t1", Utc::now()).unwrap(), Some(2));
    }

    #[test]
    fn backend_failure_maps_to_unavailable() {
        let db = Database::open_in_memory().unwrap();
        db.insert("t1", Utc::now()).unwrap();
        db.with_conn_mut(|conn| Ok(conn.execute_batch("DROP TABLE tokens;")?))
            .unwrap();

        assert!(matches!(
            db.increment_and_fetch("t1", Utc::now()),
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(db.insert("t2", Utc::now()), Err(StorageError::Unavailable(_))));
        assert!(matches!(db.fetch("t1"), Err(StorageError::Unavailable(_))));
    }
}
