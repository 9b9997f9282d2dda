//! Execution helpers for built statements.

use crate::sql::QueryBuf;
use sqlx::mysql::{MySqlArguments, MySqlQueryResult, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlConnection, MySqlPool};

fn bind(q: &QueryBuf) -> Query<'_, MySql, MySqlArguments> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

pub(crate) async fn fetch_all(pool: &MySqlPool, q: &QueryBuf) -> Result<Vec<MySqlRow>, sqlx::Error> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    bind(q).fetch_all(pool).await
}

pub(crate) async fn fetch_optional(pool: &MySqlPool, q: &QueryBuf) -> Result<Option<MySqlRow>, sqlx::Error> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    bind(q).fetch_optional(pool).await
}

pub(crate) async fn execute(pool: &MySqlPool, q: &QueryBuf) -> Result<MySqlQueryResult, sqlx::Error> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
    bind(q).execute(pool).await
}

pub(crate) async fn execute_on(conn: &mut MySqlConnection, q: &QueryBuf) -> Result<MySqlQueryResult, sqlx::Error> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "execute (conn)");
    bind(q).execute(&mut *conn).await
}

pub(crate) async fn fetch_optional_on(
    conn: &mut MySqlConnection,
    q: &QueryBuf,
) -> Result<Option<MySqlRow>, sqlx::Error> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query (conn)");
    bind(q).fetch_optional(&mut *conn).await
}
