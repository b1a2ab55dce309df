//! Telemetry helpers for applications embedding `campaign-align`.
//!
//! The engine only emits `tracing` events (series builds at `debug`, cursor
//! queries at `trace`, skipped inputs at `warn`). Installing a subscriber is
//! left to the host; these helpers exist for tools and quick experiments.

/// Filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "campaign_align=info";

/// Initializes a compact `tracing` subscriber with [`DEFAULT_TRACING_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_TRACING_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive.
///
/// `RUST_LOG` still wins over `fallback_directive` when present.
#[must_use]
pub fn init_tracing_with_directive(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
