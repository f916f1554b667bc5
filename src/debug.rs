//! Env-gated debug tracing
//!
//! Set `BARSCAN_DEBUG=1` to get stage-level scan diagnostics on stderr.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether debug tracing was requested via `BARSCAN_DEBUG`
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        std::env::var("BARSCAN_DEBUG")
            .map(|v| v != "0" && !v.is_empty())
            .unwrap_or(false)
    })
}
