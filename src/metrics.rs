//! Query and validation metrics.
//!
//! Metrics are collected through an `opentelemetry` meter wired to a Prometheus
//! exporter. [`METRICS`] is initialised lazily on first use, so crates that never
//! execute a statement pay nothing.

#[cfg(feature = "metrics")]
pub use self::prometheus_metrics::{ActiveRowMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::metrics::{Counter, Histogram, MeterProvider};
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<ActiveRowMetrics> = Lazy::new(ActiveRowMetrics::init);

    pub struct ActiveRowMetrics {
        pub registry: Registry,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub validation_failures_total: Counter<u64>,
        _provider: Option<SdkMeterProvider>,
    }

    impl ActiveRowMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let provider = match opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
            {
                Ok(exporter) => Some(SdkMeterProvider::builder().with_reader(exporter).build()),
                Err(err) => {
                    log::warn!("prometheus exporter unavailable, metrics will not be exported: {err}");
                    None
                }
            };
            let meter = match &provider {
                Some(provider) => provider.meter("activerow"),
                None => opentelemetry::global::meter("activerow"),
            };

            let queries_total = meter
                .u64_counter("activerow_queries_total")
                .with_description("Total statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("activerow_query_errors_total")
                .with_description("Statements that failed in the database")
                .build();

            let query_duration = meter
                .f64_histogram("activerow_query_duration_seconds")
                .with_description("Duration of statements")
                .build();

            let validation_failures_total = meter
                .u64_counter("activerow_validation_failures_total")
                .with_description("Writes rejected by validation before reaching the database")
                .build();

            Self {
                registry,
                queries_total,
                query_errors_total,
                query_duration,
                validation_failures_total,
                _provider: provider,
            }
        }

        pub fn record_query(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_validation_failure(&self) {
            self.validation_failures_total.add(1, &[]);
        }

        /// Render the registry in the Prometheus text exposition format.
        pub fn gather_text(&self) -> String {
            TextEncoder::new()
                .encode_to_string(&self.registry.gather())
                .unwrap_or_default()
        }
    }
}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    //! Span constructors shared by the executor and the record lifecycle.

    pub fn execute_query_span(sql: &str) -> tracing::Span {
        tracing::info_span!("activerow.query", sql = sql)
    }

    pub fn lifecycle_span(operation: &'static str, table: &'static str) -> tracing::Span {
        tracing::debug_span!("activerow.lifecycle", operation, table)
    }
}
