//! # minidb CLI Entry Point
//!
//! ```bash
//! minidb ./my.db
//! ```
//!
//! Opens (creating if absent) the database file and drops into the REPL.
//! Exit status is 0 after a clean `.exit` and non-zero on any fatal error.
//! Diagnostics controlled by `RUST_LOG` go to stderr.

use std::env;
use std::path::Path;

use env_logger::{Builder, Env};
use eyre::{Result, WrapErr};
use minidb::cli::Repl;
use minidb::Database;

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        println!("Must supply a database filename.");
        std::process::exit(1);
    };

    let db = Database::open(Path::new(&path))
        .wrap_err_with(|| format!("failed to open database at {path}"))?;

    let mut repl = Repl::new(db)?;
    repl.run()
}
