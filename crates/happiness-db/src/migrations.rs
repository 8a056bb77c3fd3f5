use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (tokens)");
        // `value` is UNIQUE so a colliding insert fails instead of
        // replacing a live counter.
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE tokens (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                value           TEXT NOT NULL UNIQUE,
                visit_count     INTEGER NOT NULL DEFAULT 0 CHECK (visit_count >= 0),
                created_at      TEXT NOT NULL,
                last_visit_at   TEXT
            );

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }
}
