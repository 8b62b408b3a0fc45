use crate::constants;
use std::net::IpAddr;
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "todolist, a minimal task-list server",
    setting = AppSettings::DeriveDisplayOrder,
    setting = AppSettings::UnifiedHelpMessage,
)]
pub struct CliOptions {
    /// Port to listen to.
    #[structopt(short, long, default_value = "3030", env = "TODOLIST_PORT")]
    pub port: u16,

    /// Network interface to listen on.
    /// The default loopback address only accepts connections from the same computer.
    #[structopt(
        short,
        long,
        default_value = "127.0.0.1",
        name = "NETWORK_INTERFACE",
        env = "TODOLIST_ADDRESS"
    )]
    pub address: IpAddr,

    /// SQLite file holding the todo items. Created (with its directory) if missing.
    #[structopt(
        short,
        long,
        default_value = constants::DATABASE_FILE,
        name = "DATABASE_FILE",
        env = "TODOLIST_DATABASE",
        parse(from_os_str)
    )]
    pub database: PathBuf,

    /// Directory with the client page (index.html, scripts, styles) to serve next to the API.
    /// Nothing but the API is served if not set.
    #[structopt(long, name = "STATIC_DIR", env = "TODOLIST_STATIC_DIR", parse(from_os_str))]
    pub static_dir: Option<PathBuf>,

    /// Value of the `Access-Control-Allow-Origin` header to add to every response,
    /// e.g. "*" when the page is served from another origin.
    #[structopt(long, name = "ORIGIN", env = "TODOLIST_CORS_ALLOW_ORIGIN")]
    pub cors_allow_origin: Option<String>,
}
