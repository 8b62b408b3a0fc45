use crate::api_model::ActionQuery;
use crate::api_model::AddItem;
use crate::api_model::UpdateItem;
use crate::database_init::Database;
use crate::error::Error;
use crate::error::Result;
use crate::input_sanitizer::sanitize_user_input;
use crate::item_collection;
use crate::todo_item::SaveOutcome;
use crate::todo_item::TodoItem;
use crate::todo_item::TodoItemConfig;
use log::debug;
use warp::http::status::StatusCode;

pub fn add_item(db: &Database, body: AddItem) -> Result<SaveOutcome<TodoItem>> {
    let text = item_text(&body.text)?;
    debug!("Action add, text {:?}", text);
    let conn = db.connect()?;
    Ok(TodoItem::create(text, &conn))
}

pub fn update_item(db: &Database, body: UpdateItem) -> Result<SaveOutcome<TodoItem>> {
    // A non-positive id would silently turn the update into an insert.
    if body.id <= 0 {
        return Err(Error::bad_request(format!(
            "Cannot update item with id {}, ids start at 1",
            body.id
        )));
    }
    let text = item_text(&body.text)?;
    debug!("Action update, id {} complete {}", body.id, body.is_complete);
    let conn = db.connect()?;
    let mut item = TodoItem::new(TodoItemConfig {
        text,
        id: body.id,
        is_complete: body.is_complete,
    });
    let debug_info = item.save(&conn);
    Ok(SaveOutcome { item, debug_info })
}

/// Sanitized item text, which must not end up empty.
fn item_text(input: &str) -> Result<String> {
    let text = sanitize_user_input(input);
    if text.is_empty() {
        return Err(Error::bad_request(format!(
            "Item text {:?} is empty after sanitizing",
            input
        )));
    }
    Ok(text)
}

pub fn list_items(db: &Database, query: &ActionQuery) -> Result<Vec<TodoItem>> {
    let page = query.page()?;
    debug!("Action list, {:?}", page);
    let conn = db.connect()?;
    item_collection::list_items(&conn, page)
}

/// Error for every request that no action route accepted.
pub fn unmatched_action(method: &warp::http::Method, query: &ActionQuery) -> Error {
    match (query.a.as_deref(), query.action()) {
        (None, _) => Error::bad_request("Error: No Action"),
        (Some(_), None) => Error::bad_request("Error: Invalid Action"),
        (Some(_), Some(action)) => Error {
            code: StatusCode::METHOD_NOT_ALLOWED,
            msg: format!(
                "Error: Action {} does not accept {} requests",
                action.name(),
                method
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_init::tests::test_database;
    use crate::todo_item::WriteCounter;
    use warp::http::Method;

    #[test]
    fn test_add_then_update() -> Result<()> {
        let db = test_database("endpoints_add_update");
        let added = add_item(
            &db,
            AddItem {
                text: "  Buy milk ".to_string(),
            },
        )?;
        assert_eq!(added.item.text, "Buy milk");
        assert_eq!(added.debug_info.counter, WriteCounter::InsertId(added.item.id));

        let updated = update_item(
            &db,
            UpdateItem {
                id: added.item.id,
                text: "Buy milk".to_string(),
                is_complete: true,
            },
        )?;
        assert!(updated.item.is_complete);
        assert_eq!(updated.debug_info.counter, WriteCounter::AffectedRows(1));

        let listed = list_items(&db, &ActionQuery::default())?;
        assert_eq!(listed, vec![updated.item]);
        Ok(())
    }

    #[test]
    fn test_update_rejects_unsaved_id() {
        let db = test_database("endpoints_update_zero");
        let err = update_item(
            &db,
            UpdateItem {
                id: 0,
                text: "x".to_string(),
                is_complete: false,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_blank_text_is_rejected() -> Result<()> {
        let db = test_database("endpoints_blank_text");
        let err = add_item(
            &db,
            AddItem {
                text: " \\\t ".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);

        let added = add_item(
            &db,
            AddItem {
                text: "x".to_string(),
            },
        )?;
        let err = update_item(
            &db,
            UpdateItem {
                id: added.item.id,
                text: "   ".to_string(),
                is_complete: true,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(list_items(&db, &ActionQuery::default())?, vec![added.item]);
        Ok(())
    }

    #[test]
    fn test_unmatched_action_messages() {
        let query = |a: Option<&str>| ActionQuery {
            a: a.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(
            unmatched_action(&Method::GET, &query(None)).msg,
            "Error: No Action"
        );
        assert_eq!(
            unmatched_action(&Method::GET, &query(Some("delete"))).msg,
            "Error: Invalid Action"
        );
        assert_eq!(
            unmatched_action(&Method::GET, &query(Some("add"))).code,
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
