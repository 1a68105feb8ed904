//! # Mango Storefront App
//!
//! Terminal front end over `mango-core`.
//!
//! ## Module Organization
//! ```text
//! mango_storefront/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── Binary arguments
//! ├── shell.rs        ◄─── Interactive line shell
//! ├── render.rs       ◄─── Text views
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── StoreConfig (defaults, TOML, env)
//! │   └── session.rs  ◄─── Session (store + config)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Search, filters, product grid
//! │   └── cart.rs     ◄─── Cart drawer and checkout
//! └── error.rs        ◄─── AppError and error codes
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ListArgs, Mode};
use error::AppResult;
use state::{Session, StoreConfig};

/// Runs the app.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,mango=debug, can be overridden with RUST_LOG        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, then config.toml, then MANGO_* variables                │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • --catalog, else config catalog_path, else built-in                │
/// │                                                                         │
/// │  4. Run Mode ─────────────────────────────────────────────────────────► │
/// │     • shell (default) or list                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();
    info!("Starting mango storefront");

    let config = StoreConfig::load(cli.config.as_deref())?;
    let mut session = Session::load(config, cli.catalog.as_deref())?;

    match cli.command.unwrap_or(Mode::Shell) {
        Mode::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell::run_shell(&mut session, stdin.lock(), &mut stdout)
        }
        Mode::List(args) => {
            println!("{}", list(&mut session, &args)?.trim_end());
            Ok(())
        }
    }
}

/// Applies `list` arguments to the session and renders the grid.
pub fn list(session: &mut Session, args: &ListArgs) -> AppResult<String> {
    use commands::catalog;

    if let Some(query) = &args.query {
        catalog::search(session, query)?;
    }
    for category in &args.category {
        catalog::toggle_category(session, *category, true)?;
    }
    for variety in &args.variety {
        catalog::toggle_variety(session, variety, true)?;
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let current = session.store.criteria().price_range;
        let min = args.min_price.unwrap_or(current.min.as_decimal());
        let max = args.max_price.unwrap_or(current.max.as_decimal());
        catalog::set_price_range(session, min, max)?;
    }
    if let Some(sort) = &args.sort {
        catalog::set_sort(session, sort)?;
    }
    if args.in_stock {
        catalog::set_in_stock_only(session, true)?;
    }

    catalog::list(session)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mango_core=trace` - Show trace for the core crate only
/// - Default: `info,mango=debug` (matches both mango crates)
///
/// Logs go to stderr so they never mix with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mango=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
