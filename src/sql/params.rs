//! Convert form input to types that sqlx can bind for MySQL.

use crate::catalog::{ColumnInfo, ColumnKind};
use crate::error::AppError;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::encode::{Encode, IsNull};
use sqlx::mysql::{MySql, MySqlTypeInfo};
use sqlx::{Database, Type};
use std::str::FromStr;

/// A value that can be bound to a MySQL statement.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    I64(i64),
    Decimal(BigDecimal),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl BindValue {
    /// Parse text typed into a dashboard form for `column`. Blank input is NULL
    /// for nullable columns.
    pub fn from_input(column: &ColumnInfo, raw: &str) -> Result<Self, AppError> {
        let s = raw.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("null") {
            if column.nullable {
                return Ok(BindValue::Null);
            }
            return Err(AppError::Validation(format!("{} is required", column.name)));
        }
        let invalid = |what: &str| AppError::Validation(format!("{} must be {}, got '{}'", column.name, what, s));
        Ok(match column.kind {
            ColumnKind::Integer => BindValue::I64(s.parse().map_err(|_| invalid("an integer"))?),
            ColumnKind::Decimal => BindValue::Decimal(BigDecimal::from_str(s).map_err(|_| invalid("a number"))?),
            ColumnKind::Text => BindValue::String(raw.to_string()),
            ColumnKind::Date => {
                BindValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid("a date (YYYY-MM-DD)"))?)
            }
            ColumnKind::DateTime => BindValue::DateTime(parse_datetime(s).ok_or_else(|| invalid("a datetime (YYYY-MM-DD HH:MM[:SS])"))?),
        })
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl<'q> Encode<'q, MySql> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <MySql as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            BindValue::Null => <Option<i64> as Encode<MySql>>::encode_by_ref(&None, buf)?,
            BindValue::I64(n) => <i64 as Encode<MySql>>::encode_by_ref(n, buf)?,
            BindValue::Decimal(d) => <BigDecimal as Encode<MySql>>::encode_by_ref(d, buf)?,
            BindValue::String(s) => <String as Encode<MySql>>::encode_by_ref(s, buf)?,
            BindValue::Date(d) => <NaiveDate as Encode<MySql>>::encode_by_ref(d, buf)?,
            BindValue::DateTime(d) => <NaiveDateTime as Encode<MySql>>::encode_by_ref(d, buf)?,
        })
    }

    fn produces(&self) -> Option<MySqlTypeInfo> {
        Some(match self {
            BindValue::Null | BindValue::I64(_) => <i64 as Type<MySql>>::type_info(),
            BindValue::Decimal(_) => <BigDecimal as Type<MySql>>::type_info(),
            BindValue::String(_) => <str as Type<MySql>>::type_info(),
            BindValue::Date(_) => <NaiveDate as Type<MySql>>::type_info(),
            BindValue::DateTime(_) => <NaiveDateTime as Type<MySql>>::type_info(),
        })
    }
}

impl Type<MySql> for BindValue {
    fn type_info() -> MySqlTypeInfo {
        <str as Type<MySql>>::type_info()
    }

    fn compatible(_ty: &MySqlTypeInfo) -> bool {
        true
    }
}
