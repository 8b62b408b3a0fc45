use crate::error::ErrorContext;
use crate::error::Result;
use log::debug;
use rusqlite::params;
use rusqlite::Connection;

pub type Rowid = i64;

/// Raw `todo_items` row, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub todo_id: Rowid,
    pub item_text: String,
    pub is_complete: bool,
}

/// Insert a new row. `is_complete` is left to the column default.
pub fn insert_item_text(conn: &Connection, item_text: &str) -> rusqlite::Result<Rowid> {
    let mut stmt = conn.prepare_cached("INSERT INTO todo_items (item_text) VALUES (?);")?;
    stmt.insert(params![item_text])
}

/// Returns the number of rows changed, zero when `todo_id` does not exist.
pub fn update_item(
    conn: &Connection,
    todo_id: Rowid,
    item_text: &str,
    is_complete: bool,
) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare_cached(
        "UPDATE todo_items \
            SET item_text = ?, \
                is_complete = ? \
          WHERE todo_id = ?;",
    )?;
    stmt.execute(params![item_text, is_complete, todo_id])
}

/// Select rows in storage order. A negative `limit` means "no limit".
pub fn select_items(conn: &Connection, offset: i64, limit: i64) -> Result<Vec<TodoRow>> {
    debug!("Selecting todo items, offset {} limit {}", offset, limit);
    let mut stmt = conn
        .prepare_cached(
            "SELECT todo_id, item_text, is_complete \
               FROM todo_items \
              ORDER BY todo_id \
              LIMIT ? OFFSET ?;",
        )
        .context_str("Failed to prepare/compile SELECT statement")?;
    let mut rows = stmt.query(params![limit, offset])?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        result.push(TodoRow {
            todo_id: row.get(0)?,
            item_text: row.get(1)?,
            is_complete: row.get(2)?,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_init::tests::test_database;
    use crate::error::Result;

    #[test]
    fn test_insert_item() -> Result<()> {
        let conn = test_database("db_insert").connect()?;
        let first = insert_item_text(&conn, "first")?;
        let second = insert_item_text(&conn, "second")?;
        assert!(first > 0);
        assert!(second > first);
        let rows = select_items(&conn, 0, -1)?;
        assert_eq!(
            rows[0],
            TodoRow {
                todo_id: first,
                item_text: "first".to_string(),
                is_complete: false,
            }
        );
        Ok(())
    }

    #[test]
    fn test_update_missing_row() -> Result<()> {
        let conn = test_database("db_update_missing").connect()?;
        assert_eq!(update_item(&conn, 42, "nothing", true)?, 0);
        Ok(())
    }

    #[test]
    fn test_select_pages() -> Result<()> {
        let conn = test_database("db_select_pages").connect()?;
        for text in &["a", "b", "c", "d"] {
            insert_item_text(&conn, text)?;
        }
        let texts = |rows: Vec<TodoRow>| -> Vec<String> {
            rows.into_iter().map(|r| r.item_text).collect()
        };
        assert_eq!(texts(select_items(&conn, 0, -1)?), vec!["a", "b", "c", "d"]);
        assert_eq!(texts(select_items(&conn, 1, 2)?), vec!["b", "c"]);
        assert_eq!(texts(select_items(&conn, 3, -1)?), vec!["d"]);
        assert!(select_items(&conn, 10, -1)?.is_empty());
        Ok(())
    }
}
