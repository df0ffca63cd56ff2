//! PostgreSQL document store: one JSONB table per collection inside a dedicated schema.

use super::DocumentStore;
use crate::config::Settings;
use crate::error::AppError;
use crate::sql;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
}

impl PgDocumentStore {
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(&settings.database_url)
            .await?;
        tracing::info!(schema = %settings.schema, "connected to postgres document store");
        let store = PgDocumentStore::from_pool(pool, settings.schema.clone());
        sqlx::query(&sql::create_schema(&store.schema))
            .execute(&store.pool)
            .await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool, schema: String) -> Self {
        PgDocumentStore { pool, schema }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError> {
        sqlx::query(&sql::create_collection(&self.schema, collection))
            .execute(&self.pool)
            .await?;
        sqlx::query(&sql::create_id_index(&self.schema, collection))
            .execute(&self.pool)
            .await?;
        tracing::debug!(collection, "collection ready");
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        let q = sql::select_all(&self.schema, collection);
        tracing::debug!(sql = %q, "query");
        let rows: Vec<(Value,)> = sqlx::query_as(&q).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(body,)| body).collect())
    }

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Value>, AppError> {
        let row: Option<(Value,)> = if field == "id" {
            let q = sql::select_by_id(&self.schema, collection);
            tracing::debug!(sql = %q, id = %value, "query");
            sqlx::query_as(&q).bind(value).fetch_optional(&self.pool).await?
        } else {
            let q = sql::select_one_by_field(&self.schema, collection);
            tracing::debug!(sql = %q, field, value = %value, "query");
            sqlx::query_as(&q)
                .bind(field)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
        };
        Ok(row.map(|(body,)| body))
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<Value, AppError> {
        let q = sql::insert(&self.schema, collection);
        tracing::debug!(sql = %q, "query");
        let (body,): (Value,) = sqlx::query_as(&q)
            .bind(&document)
            .fetch_one(&self.pool)
            .await?;
        Ok(body)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Value,
        document: Value,
    ) -> Result<Option<Value>, AppError> {
        let q = sql::update_by_id(&self.schema, collection);
        tracing::debug!(sql = %q, id = %id, "query");
        let row: Option<(Value,)> = sqlx::query_as(&q)
            .bind(id)
            .bind(&document)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(body,)| body))
    }

    async fn delete_by_id(&self, collection: &str, id: &Value) -> Result<bool, AppError> {
        let q = sql::delete_by_id(&self.schema, collection);
        tracing::debug!(sql = %q, id = %id, "query");
        let row: Option<(i64,)> = sqlx::query_as(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("postgres document store closed");
    }
}

/// Create the target database when it does not exist yet, connecting through the `postgres` maintenance DB.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/social").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "social");
    }

    #[test]
    fn keeps_query_string_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/social?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "social");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }
}
