//! SQLite connection pool and schema setup.

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info, instrument};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// Open a pool for `dsn` with foreign keys enforced on every connection.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
///
/// # Errors
/// Returns an error if the DSN is invalid or the database cannot be opened.
#[instrument]
pub async fn connect(dsn: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(dsn)
        .with_context(|| format!("Invalid database DSN: {dsn}"))?
        .foreign_keys(true)
        .create_if_missing(true);

    let in_memory = dsn.contains(":memory:") || dsn.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    Ok(pool)
}

/// Apply the embedded schema. Every statement is idempotent, so this runs on each start.
///
/// # Errors
/// Returns an error naming the statement that failed.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    for (index, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
    }

    debug!("Schema applied");

    Ok(())
}

/// Split a schema file on statement-terminating `;`, dropping `--` comment lines.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_skips_comments_and_blank_lines() {
        let sql = "-- header\n\nCREATE TABLE a (id INTEGER);\n-- note\nCREATE INDEX i\n  ON a (id);\n";
        let statements = split_sql_statements(sql);
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE a (id INTEGER);".to_string(),
                "CREATE INDEX i\n  ON a (id);".to_string(),
            ]
        );
    }

    #[test]
    fn schema_defines_three_tables_with_named_foreign_keys() {
        let statements = split_sql_statements(SCHEMA_SQL);
        let tables: Vec<_> = statements
            .iter()
            .filter(|s| s.starts_with("CREATE TABLE"))
            .collect();
        assert_eq!(tables.len(), 3);
        assert!(SCHEMA_SQL.contains("fk_hero_powers_hero_id_heroes"));
        assert!(SCHEMA_SQL.contains("fk_hero_powers_power_id_powers"));
    }

    #[tokio::test]
    async fn migrate_is_idempotent() -> Result<()> {
        let pool = connect("sqlite::memory:").await?;
        migrate(&pool).await?;
        migrate(&pool).await?;

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await?;
        assert_eq!(enabled, 1);
        Ok(())
    }
}
