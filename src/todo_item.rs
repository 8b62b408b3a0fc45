use crate::constants::GENERIC_ERROR_CODE;
use crate::constants::NO_ERROR_CODE;
use crate::database_api;
use crate::database_api::Rowid;
use crate::database_api::TodoRow;
use log::debug;
use log::warn;
use rusqlite::Connection;
use serde::Deserialize;
use serde::Serialize;

/// A single ToDo item. `id == 0` means the item was never saved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: Rowid,
    pub text: String,
    pub is_complete: bool,
}

/// Everything needed to construct a [`TodoItem`].
/// `Default` gives an unsaved (`id: 0`), incomplete item.
#[derive(Debug, Clone, Default)]
pub struct TodoItemConfig {
    pub text: String,
    pub id: Rowid,
    pub is_complete: bool,
}

/// Storage diagnostics returned by every save.
///
/// Field names on the wire are the ones clients already parse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    #[serde(rename = "mysql_errno")]
    pub errno: i32,
    #[serde(rename = "mysql_error")]
    pub error: String,
    #[serde(flatten)]
    pub counter: WriteCounter,
}

/// Operation-specific counter: the new id for an insert,
/// the number of changed rows for an update.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteCounter {
    InsertId(Rowid),
    AffectedRows(usize),
}

/// A saved value together with the diagnostics of saving it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome<T> {
    pub item: T,
    pub debug_info: DebugInfo,
}

impl DebugInfo {
    fn success(counter: WriteCounter) -> DebugInfo {
        DebugInfo {
            errno: NO_ERROR_CODE,
            error: String::new(),
            counter,
        }
    }

    fn failure(err: &rusqlite::Error, counter: WriteCounter) -> DebugInfo {
        let errno = match err {
            rusqlite::Error::SqliteFailure(ffi_error, _) => ffi_error.extended_code,
            _ => GENERIC_ERROR_CODE,
        };
        DebugInfo {
            errno,
            error: err.to_string(),
            counter,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errno == NO_ERROR_CODE
    }
}

impl TodoItem {
    pub fn new(config: TodoItemConfig) -> TodoItem {
        TodoItem {
            id: config.id,
            text: config.text,
            is_complete: config.is_complete,
        }
    }

    pub fn from_text(text: impl Into<String>) -> TodoItem {
        TodoItem::new(TodoItemConfig {
            text: text.into(),
            ..Default::default()
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Create an item and save it right away, so that a new item
    /// cannot be forgotten without ever reaching the database.
    pub fn create(text: impl Into<String>, conn: &Connection) -> SaveOutcome<TodoItem> {
        let mut item = TodoItem::from_text(text);
        let debug_info = item.save(conn);
        SaveOutcome { item, debug_info }
    }

    /// Update the stored row if this item has an id, insert it otherwise.
    pub fn save(&mut self, conn: &Connection) -> DebugInfo {
        let debug_info = if self.is_persisted() {
            self.update(conn)
        } else {
            self.insert(conn)
        };
        if !debug_info.is_success() {
            warn!(
                "Saving todo item {} failed with code {}: {}",
                self.id, debug_info.errno, debug_info.error
            );
        }
        debug_info
    }

    fn insert(&mut self, conn: &Connection) -> DebugInfo {
        debug!("Inserting todo item {:?}", self.text);
        match database_api::insert_item_text(conn, &self.text) {
            Ok(rowid) => {
                self.id = rowid;
                DebugInfo::success(WriteCounter::InsertId(rowid))
            }
            Err(err) => DebugInfo::failure(&err, WriteCounter::InsertId(0)),
        }
    }

    fn update(&self, conn: &Connection) -> DebugInfo {
        debug!("Updating todo item {}", self.id);
        match database_api::update_item(conn, self.id, &self.text, self.is_complete) {
            Ok(affected) => DebugInfo::success(WriteCounter::AffectedRows(affected)),
            Err(err) => DebugInfo::failure(&err, WriteCounter::AffectedRows(0)),
        }
    }
}

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> TodoItem {
        TodoItem::new(TodoItemConfig {
            text: row.item_text,
            id: row.todo_id,
            is_complete: row.is_complete,
        })
    }
}
