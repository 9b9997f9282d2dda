//! Plain-text tables for result sets.

use arcade_portal::service::ResultTable;
use serde_json::Value;

const MAX_CELL: usize = 40;

/// One cell as text. NULL is blank; long values are cut with an ellipsis.
pub fn cell(v: &Value) -> String {
    let s = match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let s = s.replace(['\n', '\r', '\t'], " ");
    if s.chars().count() > MAX_CELL {
        let cut: String = s.chars().take(MAX_CELL - 1).collect();
        format!("{}…", cut)
    } else {
        s
    }
}

pub fn table(columns: &[String], rows: &[Vec<Value>]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let cells: Vec<Vec<String>> = rows.iter().map(|r| r.iter().map(cell).collect()).collect();
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, c) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(c.chars().count());
            }
        }
    }
    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };
    let mut out = Vec::with_capacity(cells.len() + 3);
    out.push(line(columns));
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in &cells {
        out.push(line(row));
    }
    out.push(format!("({} row{})", rows.len(), if rows.len() == 1 { "" } else { "s" }));
    out.join("\n")
}

pub fn result_table(t: &ResultTable) -> String {
    table(&t.columns, &t.rows)
}

/// JSON objects as a table; columns follow first appearance across rows.
pub fn records(rows: &[Value]) -> String {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    let data: Vec<Vec<Value>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();
    table(&columns, &data)
}

/// A single object as aligned `key: value` lines.
pub fn record(v: &Value) -> String {
    let Value::Object(map) = v else {
        return cell(v);
    };
    let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    map.iter()
        .map(|(k, v)| format!("{:>width$}: {}", k, cell(v), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let out = records(&[
            json!({"PlayerID": 1, "Username": "ana", "RankName": null}),
            json!({"PlayerID": 22, "Username": "bartholomew", "RankName": "Gold"}),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "PlayerID | Username    | RankName");
        assert_eq!(lines[1], "---------+-------------+---------");
        assert_eq!(lines[2], "1        | ana         |");
        assert_eq!(lines[3], "22       | bartholomew | Gold");
        assert_eq!(lines[4], "(2 rows)");
    }

    #[test]
    fn empty_and_long_cells() {
        assert_eq!(records(&[]), "(no rows)");
        let long = "x".repeat(60);
        let shown = cell(&json!(long));
        assert_eq!(shown.chars().count(), MAX_CELL);
        assert!(shown.ends_with('…'));
        assert_eq!(cell(&json!("two\nlines")), "two lines");
    }

    #[test]
    fn record_aligns_keys() {
        let out = record(&json!({"Title": "Pong", "MaxPlayers": 2}));
        assert_eq!(out, "     Title: Pong\nMaxPlayers: 2");
    }
}
