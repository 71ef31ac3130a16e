//! Process-wide logging setup.

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    if tracing::init(tracing::DEFAULT_FILTER) {
        ::tracing::debug!("tracing subscriber installed");
    }
}

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;
