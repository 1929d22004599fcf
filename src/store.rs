//! Database bootstrap: create the database when missing, then the tables the
//! repository reads and writes.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS jhi_user (
        id BIGSERIAL PRIMARY KEY,
        login VARCHAR(50) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS foo (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255),
        comment VARCHAR(255),
        date TIMESTAMPTZ,
        back_id BIGINT UNIQUE REFERENCES jhi_user (id)
    )
    "#,
];

/// Idempotent; safe to run on every start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(*ddl).execute(pool).await?;
    }
    tracing::info!("tables ready");
    Ok(())
}

/// Connects to the `postgres` admin database on the same server and creates
/// the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = &url[path_start..];
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", &url[..path_start]);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
