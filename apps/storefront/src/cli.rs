//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse the catalog and manage your cart.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
pub struct Cli {
    /// Config file (defaults to storefront.toml in the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all products
    Products,

    /// Show one product
    Product {
        /// Product id
        id: u32,
    },

    /// Show or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place the order and empty the cart
    Checkout,

    /// Print the effective configuration
    Config,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show cart contents and summary
    Show,

    /// Add one unit of a product
    Add { id: u32 },

    /// Remove a product's line
    Remove { id: u32 },

    /// Increase a product's quantity by one
    Inc { id: u32 },

    /// Decrease a product's quantity by one (stops at 1)
    Dec { id: u32 },

    /// Remove every line
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::try_parse_from(["storefront", "--json", "cart", "add", "3"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Cart(CartCommand::Add { id: 3 })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["storefront", "products", "--config", "/tmp/s.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
        assert!(matches!(cli.command, Command::Products));
    }

    #[test]
    fn test_rejects_bad_id() {
        assert!(Cli::try_parse_from(["storefront", "product", "abc"]).is_err());
        assert!(Cli::try_parse_from(["storefront", "cart", "dec"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
