//! # Storefront Entry Point
//!
//! ```text
//! storefront products                 list the catalog
//! storefront product 3                product detail
//! storefront cart add 3               add one unit
//! storefront cart show                lines + Subtotal / Shipping / Total
//! storefront checkout                 place the order, empty the cart
//! ```
//!
//! The actual work is in lib.rs for testability.

use clap::Parser;
use std::process::ExitCode;

use storefront_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront_lib::init_tracing();

    let json = cli.json;
    match storefront_lib::run(cli).await {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = storefront_lib::format_error(&err, json);
            if json {
                println!("{}", message);
            } else {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}
