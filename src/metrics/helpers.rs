//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{FALLBACKS_TOTAL, FETCH_DURATION, RENDERS_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording template metrics
pub struct TemplateMetrics;

impl TemplateMetrics {
    /// Record the outcome of a render call
    pub fn record_render(source: &str, rendered: bool) {
        let outcome = if rendered { "rendered" } else { "absent" };
        RENDERS_TOTAL.with_label_values(&[source, outcome]).inc();
    }

    /// Record a fallback to the default locale
    pub fn record_fallback(source: &str) {
        FALLBACKS_TOTAL.with_label_values(&[source]).inc();
    }

    /// Record how long a single retrieval took
    pub fn observe_fetch(source: &str, elapsed: Duration) {
        FETCH_DURATION
            .with_label_values(&[source])
            .observe(elapsed.as_secs_f64());
    }
}
