use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::tier::TrafficTier;

/// Initialize Prometheus metrics exporter
///
/// The host application exposes the rendered handle on its own
/// metrics endpoint.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "pricing_quotes_total",
        "Total number of price quotes computed"
    );
    describe_counter!(
        "pricing_validation_errors_total",
        "Total number of rejected pricing inputs"
    );
    describe_counter!(
        "pricing_category_fallback_total",
        "Total number of lookups that fell back to the default rate"
    );
    describe_counter!(
        "tier_classifications_total",
        "Total number of traffic tier classifications"
    );
    describe_gauge!(
        "traffic_pricing_info",
        "Pricing library version information"
    );

    gauge!("traffic_pricing_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a computed quote
pub fn record_quote(category: &str, tier: TrafficTier) {
    counter!(
        "pricing_quotes_total",
        "category" => category.to_lowercase(),
        "tier" => tier.as_str(),
    )
    .increment(1);
}

/// Record a rejected input
pub fn record_validation_error(field: &str) {
    counter!(
        "pricing_validation_errors_total",
        "field" => field.to_string(),
    )
    .increment(1);
}

/// Record a default-rate fallback for an unknown category
pub fn record_category_fallback(category: &str) {
    counter!(
        "pricing_category_fallback_total",
        "category" => category.to_lowercase(),
    )
    .increment(1);
}

/// Record a tier classification
pub fn record_classification(tier: TrafficTier) {
    counter!(
        "tier_classifications_total",
        "tier" => tier.as_str(),
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        // Record some metrics
        record_quote("steel", TrafficTier::Gold);
        record_validation_error("base_price");
        record_category_fallback("unknown-category");
        record_classification(TrafficTier::Free);

        // Just verify the function calls don't panic; without an
        // installed recorder these are no-ops
    }
}
