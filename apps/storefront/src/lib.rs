//! # Storefront Library
//!
//! Everything behind the `storefront` binary: config, state, commands and
//! text rendering.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup, dispatch, output)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── render.rs       ◄─── text views (list, detail, cart, order)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (config + catalog + cart store)
//! │   └── config.rs   ◄─── AppConfig (TOML + SHOPFRONT_* env)
//! ├── commands/
//! │   ├── product.rs  ◄─── list_products, get_product
//! │   ├── cart.rs     ◄─── cart actions and checkout
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── ApiError for commands
//! ```
//!
//! ## Invocation Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (stderr, RUST_LOG)                               │
//! │  2. Load AppConfig (file → env → validate)                              │
//! │  3. AppState::open: storage, catalog client, CartStore, await Ready     │
//! │  4. Run the command                                                     │
//! │  5. AppState::shutdown: queued cart writes land, storage closes         │
//! │  6. Print the result (text or --json)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_core::ProductId;

use cli::{CartCommand, Cli, Command};
use error::{ApiError, ApiResult};
use state::{AppConfig, AppState};

/// Runs one storefront invocation and returns what to print on stdout.
pub async fn run(cli: Cli) -> ApiResult<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let state = AppState::open(config).await?;

    let result = execute(&state, cli.command, cli.json).await;
    state.shutdown().await;

    result
}

/// Dispatches a command against opened state.
pub async fn execute(state: &AppState, command: Command, json: bool) -> ApiResult<String> {
    let config = &state.config;

    match command {
        Command::Products => {
            let products = commands::product::list_products(state).await?;
            output(json, &products, || render::product_list(&products, config))
        }
        Command::Product { id } => {
            let product = commands::product::get_product(state, ProductId::new(id)).await?;
            output(json, &product, || render::product_detail(&product, config))
        }
        Command::Cart(action) => {
            let cart = match action {
                CartCommand::Show => commands::cart::get_cart(state),
                CartCommand::Add { id } => commands::cart::add_to_cart(state, ProductId::new(id)).await?,
                CartCommand::Remove { id } => commands::cart::remove_from_cart(state, ProductId::new(id)),
                CartCommand::Inc { id } => commands::cart::increase_quantity(state, ProductId::new(id)),
                CartCommand::Dec { id } => commands::cart::decrease_quantity(state, ProductId::new(id)),
                CartCommand::Clear => commands::cart::clear_cart(state),
            };
            output(json, &cart, || render::cart(&cart, config))
        }
        Command::Checkout => {
            let order = commands::cart::checkout(state)?;
            output(json, &order, || render::order(&order, config))
        }
        Command::Config => {
            let effective = commands::config::get_config(state);
            if json {
                Ok(serde_json::to_string_pretty(&effective)? + "\n")
            } else {
                toml::to_string_pretty(&effective)
                    .map_err(|e| ApiError::internal(format!("Failed to encode config: {}", e)))
            }
        }
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> ApiResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    } else {
        Ok(text())
    }
}

/// Formats a failed invocation for the terminal.
pub fn format_error(err: &ApiError, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(err).unwrap_or_else(|_| err.to_string())
    } else {
        format!("error: {}", err.message)
    }
}

/// Initializes the tracing subscriber. Logs go to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_cart=trace` - Trace the cart store only
/// - Default: `info,shopfront=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Shopfront storefront");
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state_with, test_state};
    use shopfront_storage::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cart_survives_between_invocations() {
        let storage = MemoryStore::new();

        let first = state_with(Arc::new(storage.clone())).await;
        execute(&first, Command::Cart(CartCommand::Add { id: 2 }), false).await.unwrap();
        execute(&first, Command::Cart(CartCommand::Add { id: 2 }), false).await.unwrap();
        first.shutdown().await;

        let second = state_with(Arc::new(storage)).await;
        let text = execute(&second, Command::Cart(CartCommand::Show), false).await.unwrap();
        assert!(text.contains("x 2"));
        assert!(text.contains("$44.60"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let state = test_state().await;
        let out = execute(&state, Command::Cart(CartCommand::Add { id: 1 }), true)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["items"][0]["product"]["price"], 109.95);
        assert_eq!(value["items"][0]["quantity"], 1);
        assert_eq!(value["totals"]["total"], 109.95);
    }

    #[tokio::test]
    async fn test_checkout_text() {
        let state = test_state().await;
        execute(&state, Command::Cart(CartCommand::Add { id: 1 }), false).await.unwrap();

        let text = execute(&state, Command::Checkout, false).await.unwrap();
        assert!(text.starts_with("Order placed"));

        let err = execute(&state, Command::Checkout, false).await.unwrap_err();
        assert_eq!(format_error(&err, false), "error: Your cart is empty");
    }

    #[tokio::test]
    async fn test_config_output() {
        let state = test_state().await;
        let text = execute(&state, Command::Config, false).await.unwrap();
        assert!(text.contains("[catalog]"));
        assert!(text.contains("in_memory = true"));
    }

    #[tokio::test]
    async fn test_products_text() {
        let state = test_state().await;
        let text = execute(&state, Command::Products, false).await.unwrap();
        assert_eq!(text.lines().count(), 2);

        let text = execute(&state, Command::Product { id: 2 }, false).await.unwrap();
        assert!(text.contains("4.1 (259 reviews)"));
    }
}
