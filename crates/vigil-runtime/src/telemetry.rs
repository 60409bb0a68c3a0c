//! Log and trace pipeline set-up for the Vigil binaries.
//!
//! Call [`init_tracing`] once at process startup to wire up the `tracing`
//! subscriber with an optional OTLP span exporter.  Each scene run is one
//! [`scene_span`]; per-detection `info!` events nest inside it, so an OTLP
//! collector sees one trace per run with its detections attached.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | OTLP collector base URL (e.g. `http://localhost:4318`). When set the OTLP HTTP exporter is activated. |
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `VIGIL_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |
//!
//! # Example
//!
//! ```rust,no_run
//! // Hold the guard for the entire lifetime of the process.
//! let _guard = vigil_runtime::telemetry::init_tracing("vigil");
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};
use tracing::{Span, debug, field, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::driver::RunSummary;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber with an optional OTLP exporter.
///
/// With `OTEL_EXPORTER_OTLP_ENDPOINT` set, scene and detection events are
/// also exported as spans over OTLP/HTTP.  Otherwise only the console
/// formatter is installed.
///
/// Keep the returned [`TracerProviderGuard`] alive until exit.
pub fn init_tracing(service_name: &str) -> TracerProviderGuard {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    let use_json = json_requested();

    let provider = build_provider(service_name);

    if let Some(ref p) = provider {
        let tracer = p.tracer("vigil");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(otel_layer)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(otel_layer)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
    } else if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }

    TracerProviderGuard(provider)
}

/// Span covering one scene run.  `frames`, `detections` and `interrupted`
/// stay empty until [`record_run`] fills them in.
pub fn scene_span(scene: &str, pool_size: usize, frame_limit: Option<u64>) -> Span {
    info_span!(
        "scene_run",
        scene,
        pool_size,
        frame_limit = frame_limit.unwrap_or(0),
        frames = field::Empty,
        detections = field::Empty,
        interrupted = field::Empty,
    )
}

/// Record a finished run's totals on its [`scene_span`].
pub fn record_run(span: &Span, summary: &RunSummary) {
    span.record("frames", summary.frames);
    span.record("detections", summary.detections);
    span.record("interrupted", summary.interrupted);
    span.in_scope(|| {
        debug!(
            frames = summary.frames,
            detections = summary.detections,
            interrupted = summary.interrupted,
            "run finished"
        );
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// RAII guard
// ─────────────────────────────────────────────────────────────────────────────

/// Shuts the OTel [`SdkTracerProvider`] down, flushing spans, when dropped.
pub struct TracerProviderGuard(Option<SdkTracerProvider>);

impl Drop for TracerProviderGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.0.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("[vigil] OpenTelemetry provider shutdown error: {e}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────────────────────

fn json_requested() -> bool {
    std::env::var("VIGIL_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Build an [`SdkTracerProvider`] when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// `None` when the variable is unset or the exporter fails to build; the
/// failure goes to stderr because no subscriber exists yet.
fn build_provider(service_name: &str) -> Option<SdkTracerProvider> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| eprintln!("[vigil] OTLP exporter init failed: {e}"))
        .ok()?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    Some(
        SdkTracerProvider::builder()
            .with_resource(resource)
            // Synchronous export: the CLI builds its Tokio runtime after this.
            .with_simple_exporter(exporter)
            .build(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_endpoint_means_no_provider() {
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::remove_var("OTEL_EXPORTER_OTLP_ENDPOINT") };
        assert!(
            build_provider("vigil-test").is_none(),
            "OTLP provider built without an endpoint"
        );
    }

    #[test]
    fn scene_span_carries_run_fields() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = scene_span("drones", 5, Some(600));
            let meta = span.metadata().expect("registry enables every span");
            assert_eq!(meta.name(), "scene_run");
            for name in ["scene", "pool_size", "frame_limit", "frames", "detections", "interrupted"] {
                assert!(meta.fields().field(name).is_some(), "missing field {name}");
            }
            record_run(
                &span,
                &RunSummary {
                    frames: 600,
                    detections: 3,
                    interrupted: false,
                },
            );
        });
    }

    #[test]
    fn empty_guard_drops_quietly() {
        drop(TracerProviderGuard(None));
    }

    #[test]
    fn json_format_is_opt_in() {
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::remove_var("VIGIL_LOG_FORMAT") };
        assert!(!json_requested());
        unsafe { std::env::set_var("VIGIL_LOG_FORMAT", "json") };
        assert!(json_requested());
        unsafe { std::env::remove_var("VIGIL_LOG_FORMAT") };
    }
}
