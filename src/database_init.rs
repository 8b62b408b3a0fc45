use crate::error::ErrorContext;
use crate::error::Result;
use log::info;
use refinery::Runner;
use rusqlite::Connection;
use std::path::Path;
use std::path::PathBuf;

pub mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./res/migrations");
}

/// Location of the SQLite database holding the `todo_items` table.
///
/// No connection is kept around: every request calls [`Database::connect`]
/// and drops the connection when it is done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .context(|| format!("Failed to open database {}", self.path.display()))
    }
}

/// Create the database file (and its directory) if needed
/// and bring the schema up-to-date.
pub fn initialize(path: impl Into<PathBuf>) -> Result<Database> {
    let path = path.into();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .context(|| format!("Failed to create database directory {}", dir.display()))?;
        }
    }
    let database = Database { path };
    let mut conn = database.connect()?;
    migrate(&mut conn)?;
    info!("Using database {}", database.path.display());
    Ok(database)
}

/// Run "refinery" migrations to bring the `todo_items` table up-to-date
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let runner: Runner = embedded::migrations::runner();
    runner
        .run(conn)
        .map(|_report| ())
        .context_str("Failed to migrate todo_items table")
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Fresh, migrated database in the system temp directory.
    /// Every test should pass its own `name`, tests run in parallel.
    pub fn test_database(name: &str) -> Database {
        let path = std::env::temp_dir().join(format!(
            "todolist-unit-{}-{}.sqlite",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        initialize(path).expect("Failed to initialize test database")
    }

    #[test]
    fn test_initialize_is_repeatable() -> Result<()> {
        let database = test_database("initialize_twice");
        let again = initialize(database.path().to_path_buf())?;
        let conn = again.connect()?;
        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM todo_items;", [], |row| row.get(0))?;
        assert_eq!(rows, 0);
        Ok(())
    }
}
