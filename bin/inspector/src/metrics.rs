//! Prometheus metrics for the event watcher.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use alloy_primitives::U256;
use metrics::{counter, describe_counter, describe_gauge, gauge};

const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Aggregated metrics for the inspector.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    /// Register metric descriptions with the global registry.
    fn register_descriptions() {
        describe_counter!(
            "inspector_events_total",
            "Total number of watched contract events by event name"
        );
        describe_counter!(
            "inspector_event_errors_total",
            "Total number of watched logs that failed to decode or verify"
        );

        // Withdrawal metrics
        describe_counter!(
            "inspector_withdrawals_total",
            "Total number of L2→L1 withdrawals observed"
        );
        describe_counter!(
            "inspector_withdrawal_mnt_gwei_total",
            "Total MNT withdrawn in gwei"
        );
        describe_counter!(
            "inspector_withdrawal_eth_gwei_total",
            "Total ETH withdrawn in gwei"
        );

        describe_gauge!(
            "inspector_last_event_block",
            "Block number of the most recent watched event"
        );
    }

    /// Record a decoded event.
    pub fn record_event(&self, event: &str, block: Option<u64>) {
        counter!("inspector_events_total", "event" => event.to_string()).increment(1);
        if let Some(block) = block {
            gauge!("inspector_last_event_block").set(block as f64);
        }
    }

    /// Record a log that could not be decoded or verified.
    pub fn record_event_error(&self) {
        counter!("inspector_event_errors_total").increment(1);
    }

    /// Record a verified withdrawal. Amounts are counted in whole gwei.
    pub fn record_withdrawal(&self, mnt_value: U256, eth_value: U256) {
        counter!("inspector_withdrawals_total").increment(1);
        counter!("inspector_withdrawal_mnt_gwei_total").increment(to_gwei(mnt_value));
        counter!("inspector_withdrawal_eth_gwei_total").increment(to_gwei(eth_value));
    }
}

fn to_gwei(wei: U256) -> u64 {
    (wei / U256::from(WEI_PER_GWEI)).saturating_to()
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
