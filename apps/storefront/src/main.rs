//! # Mango Storefront Entry Point
//!
//! ```text
//! mango-storefront [--config <file>] [--catalog <file>] [shell | list ...]
//! ```
//!
//! The actual setup is in lib.rs.

use std::process::ExitCode;

fn main() -> ExitCode {
    match mango_storefront::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.display_line());
            ExitCode::FAILURE
        }
    }
}
