extern crate todolist;

use std::net::IpAddr;
use std::net::Ipv4Addr;
use todolist::command_line_interface::CliOptions;
use todolist::database_init;
use todolist::database_init::Database;

/// Fresh, migrated database for one test. `name` must be unique per test.
pub fn test_database(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "todolist-it-{}-{}.sqlite",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    database_init::initialize(path).expect("Failed to initialize test database")
}

#[allow(dead_code)]
pub fn test_cli() -> CliOptions {
    CliOptions {
        port: 0,
        address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        database: "unused.sqlite".into(),
        static_dir: None,
        cors_allow_origin: None,
    }
}
