/// Metrics and telemetry for the metadata publisher
///
/// Provides Prometheus-compatible metrics for monitoring:
/// - Publications by store and outcome
/// - Upload latencies and volume
/// - Registration outcomes

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    // ========== Publication Metrics ==========

    /// Total publications by store and outcome
    pub static ref PUBLICATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ipa_publications_total",
        "Total number of metadata publications",
        &["store", "outcome"]
    )
    .unwrap();

    /// Publication duration in seconds (canonicalize + hash + upload)
    pub static ref PUBLICATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "ipa_publication_duration_seconds",
        "Metadata publication latencies in seconds",
        &["store"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();

    /// Bytes handed to each store
    pub static ref PUBLISHED_BYTES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ipa_published_bytes_total",
        "Total canonical bytes uploaded",
        &["store"]
    )
    .unwrap();

    // ========== Registration Metrics ==========

    /// Registration calls by registrar and outcome
    pub static ref REGISTRATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ipa_registrations_total",
        "Total number of IP asset registration calls",
        &["registrar", "outcome"]
    )
    .unwrap();
}

/// Record the outcome of a publication
pub fn record_publication(store: &str, outcome: &str, duration_secs: f64, bytes: usize) {
    PUBLICATIONS_TOTAL.with_label_values(&[store, outcome]).inc();
    PUBLICATION_DURATION_SECONDS
        .with_label_values(&[store])
        .observe(duration_secs);
    if outcome == "success" {
        PUBLISHED_BYTES_TOTAL
            .with_label_values(&[store])
            .inc_by(bytes as u64);
    }
}

/// Record the outcome of a registration
pub fn record_registration(registrar: &str, outcome: &str) {
    REGISTRATIONS_TOTAL
        .with_label_values(&[registrar, outcome])
        .inc();
}

/// Export metrics in Prometheus text format
pub fn export_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
