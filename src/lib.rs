// Library interface, shared by the server binary and the integration tests

pub mod api_client;
pub mod api_model;
pub mod command_line_interface;
pub mod constants;
pub mod database_api;
pub mod database_init;
pub mod error;
pub mod input_sanitizer;
pub mod item_collection;
pub mod list_renderer;
pub mod sync_controller;
pub mod todo_item;
pub mod warp_api;
pub mod warp_endpoints;
