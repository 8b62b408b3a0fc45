// Constants used in the project. These are "convention over configuration" for now.

pub const DATABASE_FILE: &str = "./data/db/todolist.sqlite";

/// Longest item text (in chars) that is kept after input sanitation.
pub const MAX_ITEM_TEXT_CHARS: usize = 255;

/// `debug_info` error code meaning "no storage error happened".
pub const NO_ERROR_CODE: i32 = -1;

/// Error code reported for failures that did not come from SQLite itself (SQLITE_ERROR).
pub const GENERIC_ERROR_CODE: i32 = 1;

pub const COMPLETED_CLASS: &str = "completed";

pub const LIST_FETCH_ERROR: &str = "ERROR: Could not fetch list of ToDo items.";
