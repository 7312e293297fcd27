use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tokio::runtime::Runtime;

use super::config::DbConfig;
use super::{CompanyStore, StoreError};
use crate::core::query::ExecutedQuery;
use crate::core::record::CompanyRecord;

/// Postgres-backed store. The UI is synchronous, so queries run to
/// completion on an owned tokio runtime; the connection is opened once
/// and reused for the process lifetime. All queries are read-only.
pub struct PgStore {
    rt: Runtime,
    pool: PgPool,
}

impl PgStore {
    pub fn connect(config: &DbConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("Failed to start tokio runtime")?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = rt
            .block_on(
                PgPoolOptions::new()
                    .max_connections(1)
                    .connect_with(options),
            )
            .with_context(|| {
                format!(
                    "Failed to connect to postgres at {}:{}/{}",
                    config.host, config.port, config.name
                )
            })?;

        tracing::info!(host = %config.host, database = %config.name, "connected to postgres");
        Ok(PgStore { rt, pool })
    }
}

impl CompanyStore for PgStore {
    fn count(&self, query: &ExecutedQuery) -> Result<i64, StoreError> {
        let sql = query.count_sql();
        tracing::debug!(%sql, params = query.params().len(), "running count query");

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for param in query.params() {
            q = q.bind(param);
        }
        Ok(self.rt.block_on(q.fetch_one(&self.pool))?)
    }

    fn fetch(
        &self,
        query: &ExecutedQuery,
        limit: Option<usize>,
    ) -> Result<Vec<CompanyRecord>, StoreError> {
        let sql = query.select_sql(limit);
        tracing::debug!(%sql, params = query.params().len(), "running select query");

        let mut q = sqlx::query_as::<_, CompanyRecord>(&sql);
        for param in query.params() {
            q = q.bind(param);
        }
        Ok(self.rt.block_on(q.fetch_all(&self.pool))?)
    }
}
