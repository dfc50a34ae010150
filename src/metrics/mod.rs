//! Prometheus metrics for template rendering.
//!
//! - Render outcomes by source (rendered or absent)
//! - Locale fallbacks by source
//! - Retrieval latency by source

mod helpers;

pub use helpers::{encode_metrics, TemplateMetrics};

use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "templates";

lazy_static! {
    /// Total render calls by source and outcome
    pub static ref RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_renders_total", METRIC_PREFIX),
        "Total template render calls",
        &["source", "outcome"]
    ).unwrap();

    /// Total fallbacks to the default locale
    pub static ref FALLBACKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_fallbacks_total", METRIC_PREFIX),
        "Total fallbacks from the requested locale to the default locale",
        &["source"]
    ).unwrap();

    /// Time spent retrieving a single template location
    pub static ref FETCH_DURATION: HistogramVec = register_histogram_vec!(
        format!("{}_fetch_duration_seconds", METRIC_PREFIX),
        "Template retrieval latency in seconds",
        &["source"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).unwrap();
}
