//! PostgreSQL repository implementation backed by sqlx.
//!
//! All queries are fixed, parameterized statements against a single `beer`
//! table; the non-blocking driver and its connection pool do the heavy
//! lifting. The expected schema is:
//!
//! ```sql
//! CREATE TABLE beer (
//!     id               SERIAL PRIMARY KEY,
//!     beer_name        VARCHAR NOT NULL,
//!     beer_style       VARCHAR NOT NULL,
//!     upc              VARCHAR NOT NULL UNIQUE,
//!     price            NUMERIC NOT NULL,
//!     quantity_on_hand INTEGER NOT NULL DEFAULT 0,
//!     created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at       TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! Schema creation and seeding are owned by the deployment's migration
//! scripts, not by this crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::warn;

use crate::api::{BeerStyle, PageRequest};
use crate::db::models::{Beer, BeerPage, NewBeer};
use crate::db::repository::{BeerRepository, RepositoryError, RepositoryResult};

const BEER_COLUMNS: &str =
    "id, beer_name, beer_style, upc, price, quantity_on_hand, created_at, updated_at";

/// Connection configuration for the Postgres backend.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Build configuration from environment variables.
    ///
    /// Reads `DATABASE_URL` (or `PG_DATABASE_URL`) plus the optional pool
    /// tuning variables `PG_MAX_POOL_SIZE`, `PG_MIN_POOL_SIZE`,
    /// `PG_CONNECT_TIMEOUT_SEC` and `PG_IDLE_TIMEOUT_SEC`.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL is not set".to_string())?;

        fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        Ok(Self {
            database_url,
            max_pool_size: env_parse("PG_MAX_POOL_SIZE", 10),
            min_pool_size: env_parse("PG_MIN_POOL_SIZE", 1),
            connection_timeout_sec: env_parse("PG_CONNECT_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_parse("PG_IDLE_TIMEOUT_SEC", 600),
        })
    }
}

/// Row shape returned by the `beer` table queries.
#[derive(Debug, sqlx::FromRow)]
struct BeerRow {
    id: i32,
    beer_name: String,
    beer_style: String,
    upc: String,
    price: Decimal,
    quantity_on_hand: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BeerRow> for Beer {
    type Error = RepositoryError;

    fn try_from(row: BeerRow) -> Result<Self, Self::Error> {
        let beer_style = row.beer_style.parse::<BeerStyle>().map_err(|e| {
            RepositoryError::internal(format!("Invalid beer_style in row {}: {}", row.id, e))
        })?;
        Ok(Beer {
            id: row.id,
            beer_name: row.beer_name,
            beer_style,
            upc: row.upc,
            price: row.price,
            quantity_on_hand: row.quantity_on_hand,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Connect to Postgres and build the connection pool.
    ///
    /// # Arguments
    /// * `config` - connection string and pool tuning
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` once the pool is established
    /// * `Err(RepositoryError::ConnectionError)` if the database is
    ///   unreachable
    pub async fn connect(config: &PostgresConfig) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_pool_size)
            .min_connections(config.min_pool_size)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Duration::from_secs(config.idle_timeout_sec))
            .connect(&config.database_url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Build a repository around an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BeerRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Postgres health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Beer>> {
        let row: Option<BeerRow> =
            sqlx::query_as(&format!("SELECT {} FROM beer WHERE id = $1", BEER_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::from(e).with_operation("find_by_id"))?;

        row.map(Beer::try_from).transpose()
    }

    async fn find_by_upc(&self, upc: &str) -> RepositoryResult<Option<Beer>> {
        let row: Option<BeerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM beer WHERE upc = $1",
            BEER_COLUMNS
        ))
        .bind(upc)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation("find_by_upc"))?;

        row.map(Beer::try_from).transpose()
    }

    async fn find_page(
        &self,
        name_filter: Option<&str>,
        style_filter: Option<BeerStyle>,
        page: PageRequest,
    ) -> RepositoryResult<BeerPage> {
        let style_filter = style_filter.map(|s| s.as_str());
        let limit = i64::from(page.page_size);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows: Vec<BeerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM beer \
             WHERE ($1::varchar IS NULL OR beer_name = $1) \
               AND ($2::varchar IS NULL OR beer_style = $2) \
             ORDER BY id \
             LIMIT $3 OFFSET $4",
            BEER_COLUMNS
        ))
        .bind(name_filter)
        .bind(style_filter)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation("find_page"))?;

        let total_elements: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM beer \
             WHERE ($1::varchar IS NULL OR beer_name = $1) \
               AND ($2::varchar IS NULL OR beer_style = $2)",
        )
        .bind(name_filter)
        .bind(style_filter)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation("find_page"))?;

        let beers = rows
            .into_iter()
            .map(Beer::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(BeerPage {
            beers,
            total_elements: u64::try_from(total_elements).unwrap_or(0),
        })
    }

    async fn insert(&self, new_beer: &NewBeer) -> RepositoryResult<Beer> {
        let row: BeerRow = sqlx::query_as(&format!(
            "INSERT INTO beer (beer_name, beer_style, upc, price) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            BEER_COLUMNS
        ))
        .bind(&new_beer.beer_name)
        .bind(new_beer.beer_style.as_str())
        .bind(&new_beer.upc)
        .bind(new_beer.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation("insert"))?;

        Beer::try_from(row)
    }

    async fn update(&self, id: i32, update: &NewBeer) -> RepositoryResult<Option<Beer>> {
        // upc is deliberately not part of the SET list; the key is immutable.
        let row: Option<BeerRow> = sqlx::query_as(&format!(
            "UPDATE beer \
             SET beer_name = $2, beer_style = $3, price = $4, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            BEER_COLUMNS
        ))
        .bind(id)
        .bind(&update.beer_name)
        .bind(update.beer_style.as_str())
        .bind(update.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation("update"))?;

        row.map(Beer::try_from).transpose()
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM beer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("delete_by_id"))?;

        Ok(result.rows_affected() > 0)
    }
}
