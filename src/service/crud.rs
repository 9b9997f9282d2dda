//! Generic CRUD over catalog tables and the free-text query box, both used by the dashboard.

use crate::catalog::TableInfo;
use crate::error::AppError;
use crate::service::query;
use crate::service::rows::ResultTable;
use crate::sql::{delete, insert, select_by_pk, select_list, update, BindValue};
use regex::Regex;
use serde::Serialize;
use sqlx::MySqlPool;
use std::sync::OnceLock;

pub const DEFAULT_PAGE_SIZE: u32 = 25;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

impl From<sqlx::mysql::MySqlQueryResult> for ExecOutcome {
    fn from(r: sqlx::mysql::MySqlQueryResult) -> Self {
        ExecOutcome {
            rows_affected: r.rows_affected(),
            last_insert_id: r.last_insert_id(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CustomOutcome {
    Rows(ResultTable),
    Executed(ExecOutcome),
}

pub struct CrudService;

impl CrudService {
    pub async fn list(pool: &MySqlPool, table: &TableInfo, limit: u32, offset: u32) -> Result<ResultTable, AppError> {
        let q = select_list(table, limit.max(1), offset);
        let rows = query::fetch_all(pool, &q).await?;
        Ok(ResultTable::from_rows(&rows))
    }

    pub async fn read(pool: &MySqlPool, table: &TableInfo, id: i64) -> Result<Option<ResultTable>, AppError> {
        let q = select_by_pk(table, BindValue::I64(id));
        let row = query::fetch_optional(pool, &q).await?;
        Ok(row.map(|r| ResultTable::from_rows(std::slice::from_ref(&r))))
    }

    pub async fn create(
        pool: &MySqlPool,
        table: &TableInfo,
        values: &[(String, BindValue)],
    ) -> Result<ExecOutcome, AppError> {
        let q = insert(table, values)?;
        let outcome: ExecOutcome = query::execute(pool, &q).await?.into();
        tracing::info!(table = table.name, id = outcome.last_insert_id, "row inserted");
        Ok(outcome)
    }

    /// Update one row by key. A key that matches nothing is `NotFound`.
    pub async fn update(
        pool: &MySqlPool,
        table: &TableInfo,
        id: i64,
        values: &[(String, BindValue)],
    ) -> Result<ExecOutcome, AppError> {
        let q = update(table, BindValue::I64(id), values)?;
        let outcome: ExecOutcome = query::execute(pool, &q).await?.into();
        if outcome.rows_affected == 0 && Self::read(pool, table, id).await?.is_none() {
            return Err(AppError::NotFound(format!("{} {} not found", table.name, id)));
        }
        tracing::info!(table = table.name, id, "row updated");
        Ok(outcome)
    }

    pub async fn delete(pool: &MySqlPool, table: &TableInfo, id: i64) -> Result<ExecOutcome, AppError> {
        let q = delete(table, BindValue::I64(id));
        let outcome: ExecOutcome = query::execute(pool, &q).await?.into();
        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", table.name, id)));
        }
        tracing::info!(table = table.name, id, "row deleted");
        Ok(outcome)
    }

    /// Run operator-typed SQL as-is. Only reachable from the local dashboard.
    pub async fn run_custom(pool: &MySqlPool, sql: &str) -> Result<CustomOutcome, AppError> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(AppError::Validation("query is empty".into()));
        }
        tracing::info!(sql, "custom query");
        if returns_rows(sql) {
            let rows = sqlx::raw_sql(sql).fetch_all(pool).await?;
            Ok(CustomOutcome::Rows(ResultTable::from_rows(&rows)))
        } else {
            let result = sqlx::raw_sql(sql).execute(pool).await?;
            Ok(CustomOutcome::Executed(result.into()))
        }
    }
}

/// Statements that produce a result set, after any leading comments.
pub fn returns_rows(sql: &str) -> bool {
    static ROW_STATEMENT: OnceLock<Regex> = OnceLock::new();
    let re = ROW_STATEMENT.get_or_init(|| {
        Regex::new(r"(?is)^\s*(?:(?:--|#)[^\n]*\n\s*|/\*.*?\*/\s*)*\(?\s*(select|show|describe|desc|explain|with|call|values|table)\b")
            .expect("row statement pattern is valid")
    });
    re.is_match(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_returning_statements_are_detected() {
        assert!(returns_rows("SELECT * FROM player"));
        assert!(returns_rows("  select 1"));
        assert!(returns_rows("SHOW TABLES"));
        assert!(returns_rows("describe player"));
        assert!(returns_rows("CALL sp_get_leaderboard(10)"));
        assert!(returns_rows("-- top scores\nSELECT Username FROM player"));
        assert!(returns_rows("/* check */ WITH t AS (SELECT 1) SELECT * FROM t"));
        assert!(returns_rows("(SELECT 1) UNION (SELECT 2)"));
    }

    #[test]
    fn writes_are_executed() {
        assert!(!returns_rows("UPDATE player SET Avatar = 'x.png' WHERE PlayerID = 1"));
        assert!(!returns_rows("DELETE FROM item WHERE ItemID = 3"));
        assert!(!returns_rows("INSERT INTO game (Title) VALUES ('selection')"));
        assert!(!returns_rows("selected"));
    }
}
