//! Binary entry point: resolve configuration, open (or bootstrap) the store,
//! and run the selection loop over stdin/stdout until the user quits.
use std::io;

use anyhow::Context;
use library_db::cli::announce_store;
use library_db::{logging, open, Config, Console, Dispatcher};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter)?;

    let (conn, origin) = open(&config.db_path).context("cannot start without a library store")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), config.color);
    announce_store(&mut console, &config.db_path, &origin)?;

    Dispatcher::new(&conn, console)
        .run()
        .context("library session ended unexpectedly")
}
