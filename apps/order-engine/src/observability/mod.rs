//! Tracing subscriber setup.
//!
//! Structured logging via `tracing`; the filter comes from `RUST_LOG` with
//! an `info` default. Call once at startup; repeated calls are harmless.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Returns false if a subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        // Whichever call wins, neither may panic.
        let _ = init_tracing();
        let second = init_tracing();
        assert!(!second);
    }
}
