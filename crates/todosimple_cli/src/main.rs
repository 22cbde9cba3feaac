//! `todosimple` server executable.
//!
//! # Responsibility
//! - Load configuration, start logging and open the database.
//! - Serve the HTTP API until a shutdown signal arrives.
//!
//! # Invariants
//! - Logging is active before the database is touched.
//! - Startup failures exit non-zero with a message on stderr.

use anyhow::{anyhow, Context};
use log::info;
use todosimple_api::{create_router, serve, AppState, Config};
use todosimple_core::db::open_db;
use todosimple_core::{core_version, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--version" || arg == "-V") {
        println!("todosimple {}", core_version());
        return Ok(());
    }

    let config = Config::from_env().context("failed to load configuration")?;

    init_logging(&config.log_level, &config.log_dir.to_string_lossy())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    info!(
        "event=server_start module=cli status=ok db_path={} address={}",
        config.db_path.display(),
        config.bind_address()
    );

    let router = create_router(AppState::new(conn));
    serve(&config.bind_address(), router)
        .await
        .with_context(|| format!("server on `{}` failed", config.bind_address()))?;

    info!("event=server_exit module=cli status=ok");
    Ok(())
}
