//! Builds parameterized statements: stored-procedure calls, scalar function
//! selects, and catalog-driven SELECT/INSERT/UPDATE/DELETE.

use crate::catalog::TableInfo;
use crate::error::AppError;
use crate::sql::params::BindValue;

/// Quote identifier for MySQL (safe: only from the catalog or compile-time names).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[derive(Clone, Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    pub fn new(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn push_param(&mut self, v: BindValue) {
        self.params.push(v);
    }

    pub fn with_param(mut self, v: BindValue) -> Self {
        self.push_param(v);
        self
    }
}

/// `CALL name(?, ...)` with one placeholder per positional argument.
pub fn call_procedure(name: &str, args: Vec<BindValue>) -> QueryBuf {
    QueryBuf {
        sql: format!("CALL {}({})", name, placeholders(args.len())),
        params: args,
    }
}

/// `SELECT name(?, ...) AS `alias``. The alias is always quoted since names like
/// `rank` are reserved.
pub fn scalar_function(name: &str, args: Vec<BindValue>, alias: &str) -> QueryBuf {
    QueryBuf {
        sql: format!("SELECT {}({}) AS {}", name, placeholders(args.len()), quoted(alias)),
        params: args,
    }
}

/// `SELECT COUNT(*) AS `count` FROM table [WHERE condition]`. The condition is a
/// fixed fragment, never user input.
pub fn count_rows(table: &str, condition: Option<&str>) -> QueryBuf {
    let mut sql = format!("SELECT COUNT(*) AS `count` FROM {}", quoted(table));
    if let Some(c) = condition {
        sql.push_str(" WHERE ");
        sql.push_str(c);
    }
    QueryBuf::new(sql)
}

/// List rows of a catalog table, newest key first.
pub fn select_list(table: &TableInfo, limit: u32, offset: u32) -> QueryBuf {
    let cols = table.columns.iter().map(|c| quoted(c.name)).collect::<Vec<_>>().join(", ");
    QueryBuf::new(format!(
        "SELECT {} FROM {} ORDER BY {} DESC LIMIT ? OFFSET ?",
        cols,
        quoted(table.name),
        quoted(table.order_by)
    ))
    .with_param(BindValue::I64(limit as i64))
    .with_param(BindValue::I64(offset as i64))
}

pub fn select_by_pk(table: &TableInfo, id: BindValue) -> QueryBuf {
    let cols = table.columns.iter().map(|c| quoted(c.name)).collect::<Vec<_>>().join(", ");
    QueryBuf::new(format!(
        "SELECT {} FROM {} WHERE {} = ?",
        cols,
        quoted(table.name),
        quoted(table.pk)
    ))
    .with_param(id)
}

/// INSERT of the given writable columns. Unknown or read-only columns are rejected.
pub fn insert(table: &TableInfo, values: &[(String, BindValue)]) -> Result<QueryBuf, AppError> {
    if values.is_empty() {
        return Err(AppError::Validation(format!("no values given for {}", table.name)));
    }
    let mut q = QueryBuf::default();
    let mut cols = Vec::with_capacity(values.len());
    for (name, v) in values {
        let col = writable_column(table, name)?;
        cols.push(quoted(col));
        q.push_param(v.clone());
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table.name),
        cols.join(", "),
        placeholders(cols.len())
    );
    Ok(q)
}

pub fn update(table: &TableInfo, id: BindValue, values: &[(String, BindValue)]) -> Result<QueryBuf, AppError> {
    if values.is_empty() {
        return Err(AppError::Validation("nothing to update".into()));
    }
    let mut q = QueryBuf::default();
    let mut sets = Vec::with_capacity(values.len());
    for (name, v) in values {
        let col = writable_column(table, name)?;
        sets.push(format!("{} = ?", quoted(col)));
        q.push_param(v.clone());
    }
    q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(table.name),
        sets.join(", "),
        quoted(table.pk)
    );
    Ok(q)
}

pub fn delete(table: &TableInfo, id: BindValue) -> QueryBuf {
    QueryBuf::new(format!("DELETE FROM {} WHERE {} = ?", quoted(table.name), quoted(table.pk))).with_param(id)
}

fn writable_column(table: &TableInfo, name: &str) -> Result<&'static str, AppError> {
    let col = table
        .column(name)
        .ok_or_else(|| AppError::Validation(format!("unknown column {}.{}", table.name, name)))?;
    if !col.writable {
        return Err(AppError::Validation(format!("{}.{} is read-only", table.name, col.name)));
    }
    Ok(col.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GAME, PLAYER};

    #[test]
    fn procedure_call_has_one_placeholder_per_argument() {
        let q = call_procedure(
            "sp_register_player",
            vec![
                BindValue::String("ana".into()),
                BindValue::String("ana@example.com".into()),
                BindValue::String("default.png".into()),
            ],
        );
        assert_eq!(q.sql, "CALL sp_register_player(?, ?, ?)");
        assert_eq!(q.params.len(), 3);

        assert_eq!(call_procedure("sp_complete_session", vec![BindValue::I64(7)]).sql, "CALL sp_complete_session(?)");
    }

    #[test]
    fn scalar_function_alias_is_quoted() {
        let q = scalar_function("fn_get_player_rank", vec![BindValue::I64(1)], "rank");
        assert_eq!(q.sql, "SELECT fn_get_player_rank(?) AS `rank`");
        let q = scalar_function("fn_has_achievement", vec![BindValue::I64(1), BindValue::I64(2)], "has_achievement");
        assert_eq!(q.sql, "SELECT fn_has_achievement(?, ?) AS `has_achievement`");
    }

    #[test]
    fn count_with_condition() {
        assert_eq!(count_rows("player", None).sql, "SELECT COUNT(*) AS `count` FROM `player`");
        assert_eq!(
            count_rows("multiplayersession", Some("EndTime IS NULL")).sql,
            "SELECT COUNT(*) AS `count` FROM `multiplayersession` WHERE EndTime IS NULL"
        );
    }

    #[test]
    fn insert_uses_catalog_names_and_placeholders() {
        let q = insert(
            &GAME,
            &[
                ("title".into(), BindValue::String("Pong".into())),
                ("MaxPlayers".into(), BindValue::I64(2)),
            ],
        )
        .unwrap();
        assert_eq!(q.sql, "INSERT INTO `game` (`Title`, `MaxPlayers`) VALUES (?, ?)");
        assert_eq!(q.params, vec![BindValue::String("Pong".into()), BindValue::I64(2)]);
    }

    #[test]
    fn insert_rejects_unknown_and_read_only_columns() {
        assert!(insert(&GAME, &[("Title; DROP TABLE game".into(), BindValue::Null)]).is_err());
        assert!(insert(&PLAYER, &[("RankID".into(), BindValue::I64(3))]).is_err());
        assert!(insert(&PLAYER, &[]).is_err());
    }

    #[test]
    fn update_binds_key_last() {
        let q = update(&PLAYER, BindValue::I64(9), &[("Avatar".into(), BindValue::String("cat.png".into()))]).unwrap();
        assert_eq!(q.sql, "UPDATE `player` SET `Avatar` = ? WHERE `PlayerID` = ?");
        assert_eq!(q.params.last(), Some(&BindValue::I64(9)));
    }

    #[test]
    fn list_and_delete_shapes() {
        let q = select_list(&GAME, 20, 40);
        assert_eq!(
            q.sql,
            "SELECT `GameID`, `Title`, `Genre`, `MaxPlayers`, `ReleaseDate` FROM `game` ORDER BY `GameID` DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(q.params, vec![BindValue::I64(20), BindValue::I64(40)]);
        assert_eq!(delete(&GAME, BindValue::I64(1)).sql, "DELETE FROM `game` WHERE `GameID` = ?");
    }
}
