mod cli;

use anyhow::{Context, Result};
use barrio_order::{CarrierRegistry, OrderForm, OrderService, PolicyKind};
use barrio_shared::Masked;
use barrio_store::{Config, DbClient, StoreProductRepository};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "barrio_cli=info,barrio_order=info,barrio_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load_from(&cli.config_dir).context("Failed to load config")?;
    let default_policy: PolicyKind = config
        .selection
        .default_policy
        .parse()
        .context("Invalid selection.default_policy")?;

    let db = DbClient::new(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    db.initialize_schema().await.context("Failed to initialize schema")?;
    let inserted = StoreProductRepository::new(db.pool.clone())
        .sync(&config.catalog.products)
        .await
        .context("Failed to sync catalog")?;
    tracing::debug!(inserted, configured = config.catalog.products.len(), "Catalog synced");

    let service = OrderService::new(
        db.repositories(),
        CarrierRegistry::standard(),
        config.notifications.channels.clone(),
        default_policy,
    );

    match cli.command {
        Commands::Products => {
            let products = service.list_products().await?;
            if cli.json {
                return print_json(&products);
            }
            for p in products {
                let fragile = if p.fragile { " [fragile]" } else { "" };
                println!("{:>4}  {:<12} {}{}", p.id, p.sku, p, fragile);
            }
        }
        Commands::Recent { limit } => {
            let orders = service.recent_orders(limit).await?;
            if cli.json {
                return print_json(&orders);
            }
            for o in orders {
                println!(
                    "#{:<5} {}  {:<7} {:>6}g  {}",
                    o.id,
                    o.created_at.format("%Y-%m-%d %H:%M"),
                    o.priority,
                    o.total_weight,
                    Masked(&o.customer_email)
                );
            }
        }
        Commands::Order { email, address, priority, fragility, policy, items } => {
            let form = OrderForm {
                customer_email: email,
                address,
                priority,
                fragility,
                policy: policy.unwrap_or_default(),
                items: items.into_iter().collect(),
            };
            let confirmation = service.place_order(&form).await?;
            if cli.json {
                return print_json(&confirmation);
            }
            println!("Order #{} confirmed", confirmation.order_id);
            println!("  Provider:  {} (tracking {})", confirmation.provider, confirmation.tracking_id);
            println!("  Policy:    {}", confirmation.policy);
            println!("  Package:   {} [{}]", confirmation.package.package_code, confirmation.package.handling_label);
            println!("  Weight:    {}g in {} item(s)", confirmation.package.total_weight, confirmation.package.item_count);
            println!("  Pickup by: {}", confirmation.package.estimated_pickup.format("%Y-%m-%d %H:%M UTC"));
        }
        Commands::Show { order_id } => {
            let view = service
                .order_with_items(order_id)
                .await?
                .with_context(|| format!("Order #{} not found", order_id))?;
            let shipment = service.latest_shipment(order_id).await?;
            let notifications = service.notifications(order_id).await?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "order": view,
                    "shipment": shipment,
                    "notifications": notifications,
                }));
            }

            let order = &view.order;
            println!("Order #{} for {}", order.id, Masked(&order.customer_email));
            println!("  Address:   {}", order.address);
            println!("  Priority:  {}  Fragility: {}", order.priority, order.fragility);
            println!("  Weight:    {}g", order.total_weight);
            for line in &view.items {
                println!("    {} x {} = {}g", line.item.quantity, line.product, line.weight());
            }
            match shipment {
                Some(s) => println!("  Shipment:  {} {} ({})", s.provider, s.tracking_id, s.status),
                None => println!("  Shipment:  none"),
            }
            for n in notifications {
                println!("  [{}] {}", n.channel, n.message);
            }
        }
        Commands::Status { order_id } => {
            let status = service
                .order_status(order_id)
                .await?
                .with_context(|| format!("Order #{} not found", order_id))?;
            if cli.json {
                return print_json(&status);
            }
            println!("Order #{}: {}", status.order_id, status.status);
            if let (Some(provider), Some(tracking)) = (status.provider, &status.tracking_id) {
                println!("  {} {}", provider, tracking);
            }
            println!("  Notifications sent: {}", status.notifications_sent);
        }
        Commands::Advance { order_id, status } => {
            let record = service.announce_status(order_id, status).await?;
            if cli.json {
                return print_json(&record);
            }
            println!(
                "{} announced for order #{}: {}/{} channel(s) delivered",
                record.event, record.order_id, record.delivered, record.observers_notified
            );
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
