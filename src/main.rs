use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod config;

#[derive(Parser)]
#[command(name = "yatube", version, about = "Yatube blogging platform")]
struct Args {
    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let cfg = config::Config::try_load_from_file_or_default(args.config_file.as_ref())?;

    let db_url = args.db_url.unwrap_or(cfg.db.conn_sqlite);
    let pool_size = u32::from(cfg.db.conn_pool_size);
    log::info!("Connecting to SQLite database '{db_url}' (pool size = {pool_size})");
    let connections = yatube_db_sqlite::Connections::init(&db_url, pool_size)?;

    yatube_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    let enable_cors = args.enable_cors || cfg.webserver.enable_cors;
    yatube_webserver::run(connections, enable_cors, (&cfg.webserver).into());
    Ok(())
}
