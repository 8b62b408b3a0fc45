use crate::database_api;
use crate::error::ErrorContext;
use crate::error::Result;
use crate::todo_item::TodoItem;
use rusqlite::Connection;

/// Which slice of the list to return. `count: None` means "everything after `offset`".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub count: Option<u32>,
}

/// All stored items of the requested page, in storage order.
pub fn list_items(conn: &Connection, page: Page) -> Result<Vec<TodoItem>> {
    let limit = page.count.map(i64::from).unwrap_or(-1);
    let rows = database_api::select_items(conn, i64::from(page.offset), limit)
        .context(|| format!("Failed to list todo items for {:?}", page))?;
    Ok(rows.into_iter().map(TodoItem::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_init::tests::test_database;
    use warp::http::StatusCode;

    #[test]
    fn test_empty_table() -> Result<()> {
        let conn = test_database("collection_empty").connect()?;
        assert!(list_items(&conn, Page::default())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_order_and_paging() -> Result<()> {
        let conn = test_database("collection_order").connect()?;
        let created: Vec<TodoItem> = ["one", "two", "three"]
            .iter()
            .map(|text| TodoItem::create(*text, &conn).item)
            .collect();
        assert_eq!(list_items(&conn, Page::default())?, created);
        let page = Page {
            offset: 1,
            count: Some(1),
        };
        assert_eq!(list_items(&conn, page)?, vec![created[1].clone()]);
        Ok(())
    }

    #[test]
    fn test_failure_is_not_an_empty_list() -> Result<()> {
        let conn = test_database("collection_failure").connect()?;
        conn.execute_batch("DROP TABLE todo_items;")?;
        let err = list_items(&conn, Page::default()).unwrap_err();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.msg.contains("Failed to list todo items"), "{}", err.msg);
        Ok(())
    }
}
