#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled, the usual `tracing` macros are
//! re-exported so downstream crates log through `sortrow_core::debug!` and
//! friends without naming `tracing` themselves. Without the feature this
//! module is empty and every call site is compiled out behind
//! `#[cfg(feature = "tracing")]`.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], a one-call
//! installer for newline-delimited JSON output filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
