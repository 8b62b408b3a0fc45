use chrono::Utc;
use env_logger::Env;
use log::error;
use std::io::Write;
use structopt::StructOpt;
use todolist::command_line_interface::CliOptions;
use todolist::database_init;
use todolist::warp_api;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", "info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = CliOptions::from_args();

    let database = database_init::initialize(&cli.database).unwrap_or_else(|err| {
        error!("Failed to initialize database, {}", err);
        std::process::exit(1);
    });

    // Start web framework
    if let Err(err) = warp_api::run_server(cli, database).await {
        error!("Failed to start server, {}", err);
        std::process::exit(1);
    }
}
