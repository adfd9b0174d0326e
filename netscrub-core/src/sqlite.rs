// netscrub-core/src/sqlite.rs
//! Scrubbing of SQLite stores found inside a bundle.
//!
//! Every column of every table is treated as a candidate, whatever its declared
//! type. Rows are identified by their full original column tuple rather than a
//! key: the UPDATE for a changed row filters on every column being equal to the
//! value that was read, so rows with identical content are rewritten together.
//! For the same reason a later update can land on a row that was already
//! rewritten: when one row's new tuple equals another row's original tuple
//! (an address stored next to its own codeword pseudonym, for example), the
//! second update rewrites both rows.
//!
//! All updates for one table run in a single transaction.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

use crate::errors::{NetscrubError, Result};

/// Literal prefix that identifies an SQLite database image.
pub const SQLITE_PREFIX: &[u8] = b"SQLite format ";

/// Returns `true` if `data` starts with the SQLite header signature.
pub fn is_sqlite_image(data: &[u8]) -> bool {
    data.starts_with(SQLITE_PREFIX)
}

/// Quotes an identifier for use in a statement.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// One row as read from the store. The values are kept untouched so they can
/// be replayed as the WHERE predicate of the update.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    pub values: Vec<Value>,
}

/// Names of all tables in the store, in `sqlite_master` order.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table'")
        .map_err(|e| NetscrubError::store("failed to list tables", e))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| NetscrubError::store("failed to list tables", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| NetscrubError::store("failed to read table name", e))?;
    Ok(names)
}

/// Names of every column of `table`, in declaration order.
pub fn list_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let context = || format!("failed to list columns of table {}", table);
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))
        .map_err(|e| NetscrubError::store(context(), e))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| NetscrubError::store(context(), e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| NetscrubError::store(context(), e))?;
    Ok(names)
}

/// Reads every row of `table` restricted to `columns`.
pub fn read_rows(conn: &Connection, table: &str, columns: &[String]) -> Result<Vec<RowSnapshot>> {
    let context = || format!("failed to read rows of table {}", table);
    let select = format!(
        "SELECT {} FROM {}",
        columns.iter().map(|c| quote_identifier(c)).collect::<Vec<_>>().join(", "),
        quote_identifier(table)
    );
    let mut stmt = conn.prepare(&select).map_err(|e| NetscrubError::store(context(), e))?;
    let width = columns.len();
    let rows = stmt
        .query_map([], |row| {
            let values = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(RowSnapshot { values })
        })
        .map_err(|e| NetscrubError::store(context(), e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| NetscrubError::store(context(), e))?;
    Ok(rows)
}

/// Runs one field through `anonymize`.
///
/// TEXT is anonymized as is. INTEGER and REAL are rendered as text first and
/// only replaced (by the anonymized text) if the rendering changed. NULL and
/// BLOB values are never rewritten.
pub fn anonymize_value<F>(value: &Value, anonymize: &mut F) -> Value
where
    F: FnMut(&str) -> String,
{
    let rendered = match value {
        Value::Text(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Null | Value::Blob(_) => return value.clone(),
    };
    let out = anonymize(&rendered);
    if out == rendered {
        value.clone()
    } else {
        Value::Text(out)
    }
}

/// Builds `UPDATE t SET c1 = ?, ... WHERE c1 IS ? AND ...`.
///
/// `IS` rather than `=` so that NULL columns in the original tuple still match.
pub fn build_update_statement(table: &str, columns: &[String]) -> String {
    let set = columns
        .iter()
        .map(|c| format!("{} = ?", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let filter = columns
        .iter()
        .map(|c| format!("{} IS ?", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("UPDATE {} SET {} WHERE {}", quote_identifier(table), set, filter)
}

/// Scrubs one table. Returns the number of rows for which an update was issued.
pub fn scrub_table<F>(conn: &Connection, table: &str, anonymize: &mut F) -> Result<usize>
where
    F: FnMut(&str) -> String,
{
    let columns = list_columns(conn, table)?;
    if columns.is_empty() {
        debug!("Table {} has no columns, skipping.", table);
        return Ok(0);
    }

    // Snapshot first so updates never race the read cursor.
    let rows = read_rows(conn, table, &columns)?;
    let changes: Vec<(Vec<Value>, &RowSnapshot)> = rows
        .iter()
        .filter_map(|row| {
            let new_values: Vec<Value> = row.values.iter().map(|v| anonymize_value(v, &mut *anonymize)).collect();
            (new_values != row.values).then_some((new_values, row))
        })
        .collect();
    if changes.is_empty() {
        return Ok(0);
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| NetscrubError::store(format!("failed to begin update of table {}", table), e))?;
    match apply_updates(&tx, table, &columns, &changes) {
        Ok(updated) => {
            tx.commit()
                .map_err(|e| NetscrubError::store(format!("failed to commit updates to table {}", table), e))?;
            Ok(updated)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn apply_updates(
    conn: &Connection,
    table: &str,
    columns: &[String],
    changes: &[(Vec<Value>, &RowSnapshot)],
) -> Result<usize> {
    let context = || format!("failed to update table {}", table);
    let mut stmt = conn
        .prepare_cached(&build_update_statement(table, columns))
        .map_err(|e| NetscrubError::store(context(), e))?;
    for (new_values, row) in changes {
        let params = new_values.iter().chain(row.values.iter());
        let affected = stmt
            .execute(params_from_iter(params))
            .map_err(|e| NetscrubError::store(context(), e))?;
        debug!("Updated {} row(s) in table {}.", affected, table);
    }
    Ok(changes.len())
}

/// Opens the store at `path` and scrubs every table in place.
pub fn scrub_database<F>(path: &Path, mut anonymize: F) -> Result<usize>
where
    F: FnMut(&str) -> String,
{
    let conn = Connection::open(path)
        .map_err(|e| NetscrubError::store(format!("failed to open store {}", path.display()), e))?;
    let mut updated = 0;
    for table in list_tables(&conn)? {
        updated += scrub_table(&conn, &table, &mut anonymize)?;
    }
    conn.close()
        .map_err(|(_, e)| NetscrubError::store(format!("failed to close store {}", path.display()), e))?;
    info!("Scrubbed SQLite store, {} row update(s) issued.", updated);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sqlite_signature() {
        assert!(is_sqlite_image(b"SQLite format 3\0rest"));
        assert!(!is_sqlite_image(b"plain text"));
        assert!(!is_sqlite_image(b"SQLite"));
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("hosts"), "\"hosts\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_update_statement_uses_every_column() {
        let sql = build_update_statement("t", &["a".to_string(), "b".to_string()]);
        assert_eq!(sql, "UPDATE \"t\" SET \"a\" = ?, \"b\" = ? WHERE \"a\" IS ? AND \"b\" IS ?");
    }

    #[test]
    fn test_value_handling_by_type() {
        let mut upper = |s: &str| s.to_uppercase();
        assert_eq!(anonymize_value(&Value::Text("abc".into()), &mut upper), Value::Text("ABC".into()));
        assert_eq!(anonymize_value(&Value::Integer(7), &mut upper), Value::Integer(7));
        assert_eq!(anonymize_value(&Value::Null, &mut upper), Value::Null);
        assert_eq!(anonymize_value(&Value::Blob(b"abc".to_vec()), &mut upper), Value::Blob(b"abc".to_vec()));
    }

    #[test]
    fn test_scrub_in_memory_updates_only_changed_rows() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("t.sqlite");
        {
            let conn = Connection::open(&path)?;
            conn.execute_batch(
                "CREATE TABLE hosts (id INTEGER, addr TEXT, note TEXT);
                 INSERT INTO hosts VALUES (1, 'secret', 'keep');
                 INSERT INTO hosts VALUES (2, 'public', NULL);",
            )?;
        }
        let updated = scrub_database(&path, |s| s.replace("secret", "XXXX"))?;
        assert_eq!(updated, 1);

        let conn = Connection::open(&path)?;
        let rows: Vec<(i64, String, Option<String>)> = conn
            .prepare("SELECT id, addr, note FROM hosts ORDER BY id")?
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
            .collect::<rusqlite::Result<_>>()?;
        assert_eq!(
            rows,
            vec![
                (1, "XXXX".to_string(), Some("keep".to_string())),
                (2, "public".to_string(), None)
            ]
        );
        Ok(())
    }
}
