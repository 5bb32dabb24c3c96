/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use kitchen_dispatch::{DispatchConfig, Driver};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |ms| format!("{ms:.2} ms"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match DispatchConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };
    let driver = Driver::new(config);

    let (orders, couriers) = match driver.load_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            error!(%err, "failed to load inputs");
            std::process::exit(1);
        }
    };

    let report = match driver.run(orders, couriers).await {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "dispatch run failed");
            std::process::exit(1);
        }
    };

    info!(
        policy = %report.policy,
        matches = report.stats.matches,
        unmatched_orders = report.unmatched_orders.len(),
        idle_couriers = report.idle_couriers.len(),
        "dispatch run complete"
    );
    info!("Average food wait time: {}", format_ms(report.stats.average_order_wait_ms));
    info!("Average courier wait time: {}", format_ms(report.stats.average_courier_wait_ms));

    if driver.config().record_journal {
        match report.verify_replay() {
            Ok(true) => info!(events = report.journal.events().len(), "journal replay verified"),
            Ok(false) => warn!("journal replay produced a different match log"),
            Err(err) => warn!(%err, "journal replay failed"),
        }
    }
}
