//! PostgreSQL implementation of the alias store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::entities::{AliasMapping, NewAliasMapping};
use crate::domain::repositories::AliasStore;
use crate::error::StoreError;
use crate::utils::db_error::is_unique_violation_on_alias;

/// Row shape of the `alias_mappings` table.
#[derive(Debug, sqlx::FromRow)]
struct AliasRow {
    id: i64,
    alias: String,
    destination_url: String,
    created_at: DateTime<Utc>,
}

impl From<AliasRow> for AliasMapping {
    fn from(r: AliasRow) -> Self {
        AliasMapping::new(r.id, r.alias, r.destination_url, r.created_at)
    }
}

/// PostgreSQL alias store.
///
/// Uniqueness is enforced by the `alias_mappings_alias_key` constraint, so a
/// plain `INSERT` is the atomic uniqueness decision. `id` comes from a
/// `BIGSERIAL` and `created_at` from `DEFAULT now()`.
pub struct PgAliasStore {
    pool: Arc<PgPool>,
}

impl PgAliasStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a pool sized from `config` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, the connection fails,
    /// or a migration cannot be applied.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(database_url)
            .await?;
        info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");

        Ok(Self::new(Arc::new(pool)))
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl AliasStore for PgAliasStore {
    async fn put(&self, new_mapping: NewAliasMapping) -> Result<AliasMapping, StoreError> {
        let result = sqlx::query_as::<_, AliasRow>(
            r#"
            INSERT INTO alias_mappings (alias, destination_url)
            VALUES ($1, $2)
            RETURNING id, alias, destination_url, created_at
            "#,
        )
        .bind(&new_mapping.alias)
        .bind(&new_mapping.destination_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => {
                debug!("Stored alias {} (id {})", row.alias, row.id);
                Ok(row.into())
            }
            Err(e) if is_unique_violation_on_alias(&e) => {
                debug!("Alias {} already present", new_mapping.alias);
                Err(StoreError::DuplicateKey(new_mapping.alias))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<AliasMapping>, StoreError> {
        let row = sqlx::query_as::<_, AliasRow>(
            r#"
            SELECT id, alias, destination_url, created_at
            FROM alias_mappings
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AliasMapping::from))
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM alias_mappings WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<AliasMapping>, StoreError> {
        let rows = sqlx::query_as::<_, AliasRow>(
            r#"
            SELECT id, alias, destination_url, created_at
            FROM alias_mappings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AliasMapping::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
