use std::sync::Arc;

use anyhow::Result;
use bb8::PooledConnection;
use bb8_postgres::PostgresConnectionManager;
use chrono::Utc;
use postgres_native_tls::MakeTlsConnector;
use tracing::error;
use tracing::info;

use crate::err_with_loc;
use crate::error::PostgresClientError;
use crate::storage::postgres::PostgresPool;

/// Highest version returned by [`migrations`]
pub const CURRENT_SCHEMA_VERSION: i64 = 3;

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    /// Statements run in order inside one transaction
    pub sql: Vec<&'static str>,
}

pub struct Migrator {
    pool: Arc<PostgresPool>,
}

impl Migrator {
    pub fn new(pool: Arc<PostgresPool>) -> Self {
        Self { pool }
    }

    /// Applies every migration whose version is not yet recorded and returns
    /// the schema version the database is at afterwards.
    pub async fn run_migrations(&self) -> Result<i64> {
        self.create_migrations_table().await?;

        let applied = self.get_applied_migrations().await?;
        let mut version = applied.iter().max().copied().unwrap_or(0);

        for migration in pending(&migrations(), &applied) {
            info!("applying_migration::{}_{}", migration.version, migration.name);
            self.apply_migration(migration).await?;
            version = version.max(migration.version);
        }

        Ok(version)
    }

    async fn connection(&self) -> Result<PooledConnection<'_, PostgresConnectionManager<MakeTlsConnector>>> {
        self.pool.get().await.map_err(|e| {
            error!("migrator::pool_connection_failed: {}", e);
            err_with_loc!(PostgresClientError::PoolError(e))
        })
    }

    async fn create_migrations_table(&self) -> Result<()> {
        let conn = self.connection().await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS migrations (
                version BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TIMESTAMP WITH TIME ZONE NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| {
            error!("migrator::create_table_failed: {}", e);
            err_with_loc!(PostgresClientError::TransactionError(format!("migrator::create_table_failed: {}", e)))
        })?;

        Ok(())
    }

    async fn get_applied_migrations(&self) -> Result<Vec<i64>> {
        let conn = self.connection().await?;

        let rows = conn
            .query("SELECT version FROM migrations ORDER BY version ASC", &[])
            .await
            .map_err(|e| {
                error!("migrator::read_applied_failed: {}", e);
                err_with_loc!(PostgresClientError::QueryError(format!("failed_to_get_applied_migrations: {}", e)))
            })?;

        Ok(rows.iter().map(|row| row.get::<_, i64>(0)).collect())
    }

    async fn apply_migration(
        &self,
        migration: &Migration,
    ) -> Result<()> {
        let mut conn = self.connection().await?;

        let tx = conn.transaction().await.map_err(|e| {
            error!("migrator::begin_failed::{}: {}", migration.version, e);
            err_with_loc!(PostgresClientError::TransactionError(format!("failed_to_start_transaction: {}", e)))
        })?;

        for (i, sql) in migration.sql.iter().enumerate() {
            tx.execute(*sql, &[]).await.map_err(|e| {
                error!("migrator::statement_failed::{}_{}::{}: {}", migration.version, migration.name, i, e);
                err_with_loc!(PostgresClientError::QueryError(format!(
                    "failed_to_execute_migration_statement {}: {}_{}: {}",
                    i, migration.version, migration.name, e
                )))
            })?;
        }

        let now = Utc::now();
        tx.execute("INSERT INTO migrations (version, name, applied_at) VALUES ($1, $2, $3)", &[
            &migration.version,
            &migration.name,
            &now,
        ])
        .await
        .map_err(|e| {
            error!("migrator::record_failed::{}_{}: {}", migration.version, migration.name, e);
            err_with_loc!(PostgresClientError::QueryError(format!(
                "failed_to_record_migration: {}_{}: {}",
                migration.version, migration.name, e
            )))
        })?;

        tx.commit().await.map_err(|e| {
            error!("migrator::commit_failed::{}_{}: {}", migration.version, migration.name, e);
            err_with_loc!(PostgresClientError::TransactionError(format!("failed_to_commit_transaction: {}", e)))
        })?;

        info!("applied_migration::{}_{}", migration.version, migration.name);
        Ok(())
    }
}

fn pending<'a>(
    migrations: &'a [Migration],
    applied: &[i64],
) -> Vec<&'a Migration> {
    migrations.iter().filter(|m| !applied.contains(&m.version)).collect()
}

pub fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "create_address_searches_table",
            sql: vec![
                r#"
                CREATE TABLE IF NOT EXISTS address_searches (
                    address TEXT PRIMARY KEY,
                    search_count BIGINT NOT NULL DEFAULT 0,
                    first_searched_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                    last_searched_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
                )
                "#,
            ],
        },
        Migration {
            version: 2,
            name: "create_transaction_searches_table",
            sql: vec![
                r#"
                CREATE TABLE IF NOT EXISTS transaction_searches (
                    tx_hash TEXT PRIMARY KEY,
                    search_count BIGINT NOT NULL DEFAULT 0,
                    first_searched_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                    last_searched_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
                )
                "#,
            ],
        },
        // Leaderboard reads sort on (search_count DESC, key ASC)
        Migration {
            version: 3,
            name: "create_search_count_indexes",
            sql: vec![
                "CREATE INDEX IF NOT EXISTS idx_address_searches_rank ON address_searches(search_count DESC, address ASC)",
                "CREATE INDEX IF NOT EXISTS idx_transaction_searches_rank ON transaction_searches(search_count DESC, tx_hash ASC)",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_unique_and_end_at_current() {
        let all = migrations();
        let mut versions: Vec<i64> = all.iter().map(|m| m.version).collect();
        versions.dedup();
        assert_eq!(versions.len(), all.len());
        assert_eq!(versions.last().copied(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn only_unapplied_migrations_are_pending() {
        let all = migrations();
        let pending: Vec<i64> = pending(&all, &[1]).iter().map(|m| m.version).collect();
        assert_eq!(pending, vec![2, 3]);
        assert!(super::pending(&all, &[1, 2, 3]).is_empty());
    }
}
