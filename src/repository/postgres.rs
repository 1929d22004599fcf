//! `foo` table access through sqlx. Table DDL lives in `store::ensure_tables`.

use super::{FooRepository, Page, PageRequest};
use crate::domain::{Foo, User};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

const PROJECTION: &str = "s.id, s.name, s.comment, s.date, s.back_id, u.login AS back_login";

#[derive(Clone)]
pub struct PgFooRepository {
    pool: PgPool,
}

impl PgFooRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(conn: &mut PgConnection, foo: &Foo) -> Result<Foo, AppError> {
        let sql = format!(
            "WITH s AS (INSERT INTO foo (name, comment, date, back_id) VALUES ($1, $2, $3, $4) RETURNING *) \
             SELECT {} FROM s LEFT JOIN jhi_user u ON u.id = s.back_id",
            PROJECTION
        );
        tracing::debug!(sql = %sql, foo = %foo, "query");
        let row = sqlx::query(&sql)
            .bind(foo.name.as_deref())
            .bind(foo.comment.as_deref())
            .bind(foo.date)
            .bind(foo.back.as_ref().map(|u| u.id))
            .fetch_one(&mut *conn)
            .await?;
        Ok(row_to_foo(&row)?)
    }

    async fn update(conn: &mut PgConnection, id: i64, foo: &Foo) -> Result<Option<Foo>, AppError> {
        let sql = format!(
            "WITH s AS (UPDATE foo SET name = $2, comment = $3, date = $4, back_id = $5 WHERE id = $1 RETURNING *) \
             SELECT {} FROM s LEFT JOIN jhi_user u ON u.id = s.back_id",
            PROJECTION
        );
        tracing::debug!(sql = %sql, foo = %foo, "query");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(foo.name.as_deref())
            .bind(foo.comment.as_deref())
            .bind(foo.date)
            .bind(foo.back.as_ref().map(|u| u.id))
            .fetch_optional(&mut *conn)
            .await?;
        row.as_ref().map(row_to_foo).transpose().map_err(AppError::from)
    }
}

#[async_trait]
impl FooRepository for PgFooRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Foo>, AppError> {
        // Count and page come from one snapshot so the totals match the content.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foo")
            .fetch_one(&mut *tx)
            .await?;
        let sql = format!(
            "SELECT {} FROM foo s LEFT JOIN jhi_user u ON u.id = s.back_id ORDER BY s.id LIMIT $1 OFFSET $2",
            PROJECTION
        );
        tracing::debug!(sql = %sql, page = request.page, size = request.size, "query");
        let rows = sqlx::query(&sql)
            .bind(request.size as i64)
            .bind(request.offset().min(i64::MAX as u64) as i64)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        let content = rows.iter().map(row_to_foo).collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn find_one(&self, id: i64) -> Result<Option<Foo>, AppError> {
        let sql = format!(
            "SELECT {} FROM foo s LEFT JOIN jhi_user u ON u.id = s.back_id WHERE s.id = $1",
            PROJECTION
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_foo).transpose().map_err(AppError::from)
    }

    async fn save(&self, foo: Foo) -> Result<Foo, AppError> {
        let mut tx = self.pool.begin().await?;
        let saved = match foo.id {
            Some(id) => match Self::update(&mut tx, id, &foo).await? {
                Some(updated) => updated,
                None => Self::insert(&mut tx, &foo).await?,
            },
            None => Self::insert(&mut tx, &foo).await?,
        };
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(id, "delete foo");
        sqlx::query("DELETE FROM foo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_foo(row: &PgRow) -> Result<Foo, sqlx::Error> {
    let back_id: Option<i64> = row.try_get("back_id")?;
    let back_login: Option<String> = row.try_get("back_login")?;
    Ok(Foo {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        comment: row.try_get("comment")?,
        date: row.try_get("date")?,
        back: back_id.map(|id| User { id, login: back_login }),
    })
}
