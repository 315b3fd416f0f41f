//! Command-line arguments for the `barrio` binary.

use barrio_core::ShipmentStatus;
use clap::{Parser, Subcommand};

/// Confirm and follow neighbourhood marketplace orders
#[derive(Parser)]
#[command(name = "barrio")]
#[command(about = "barrio - confirm orders and hand them to local couriers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding default.toml and environment overrides
    #[arg(long, default_value = "config", global = true)]
    pub config_dir: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the product catalog
    Products,

    /// Show the most recent orders
    Recent {
        #[arg(short = 'n', long, default_value = "5")]
        limit: u32,
    },

    /// Place and confirm an order
    Order {
        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        /// normal or express
        #[arg(long, default_value = "normal")]
        priority: String,

        /// none, weak or high
        #[arg(long, default_value = "none")]
        fragility: String,

        /// standard, eco or cost (defaults to the configured policy)
        #[arg(long)]
        policy: Option<String>,

        /// Product and quantity, repeatable
        #[arg(long = "item", value_name = "ID=QTY", value_parser = parse_item, required = true)]
        items: Vec<(String, String)>,
    },

    /// Show an order with its items, shipment and notifications
    Show { order_id: i64 },

    /// Show where an order stands
    Status { order_id: i64 },

    /// Announce a shipment status to every notification channel
    Advance {
        order_id: i64,

        /// dispatched, in_transit or delivered
        #[arg(value_parser = parse_status)]
        status: ShipmentStatus,
    },
}

fn parse_item(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(id, qty)| (id.trim().to_string(), qty.trim().to_string()))
        .ok_or_else(|| format!("expected ID=QTY, got {:?}", raw))
}

fn parse_status(raw: &str) -> Result<ShipmentStatus, String> {
    raw.trim()
        .to_lowercase()
        .replace('-', "_")
        .parse()
        .map_err(|e: barrio_core::ParseVariantError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_command_parses_items() {
        let cli = Cli::try_parse_from([
            "barrio", "order", "--email", "ana@example.com", "--address", "Calle 1",
            "--item", "1=2", "--item", "3 = 1",
        ])
        .unwrap();

        match cli.command {
            Commands::Order { items, priority, policy, .. } => {
                assert_eq!(items, vec![("1".into(), "2".into()), ("3".into(), "1".into())]);
                assert_eq!(priority, "normal");
                assert!(policy.is_none());
            }
            _ => panic!("expected order command"),
        }
    }

    #[test]
    fn test_item_without_quantity_rejected() {
        assert!(Cli::try_parse_from([
            "barrio", "order", "--email", "a@b.com", "--address", "x", "--item", "12",
        ])
        .is_err());
    }

    #[test]
    fn test_advance_accepts_dashed_status() {
        let cli = Cli::try_parse_from(["barrio", "advance", "4", "in-transit"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Advance { order_id: 4, status: ShipmentStatus::InTransit }
        ));
    }
}
