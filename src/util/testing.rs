//! Tracing setup shared by unit and integration tests.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset: everything this crate emits.
const DEFAULT_DIRECTIVE: &str = "coven=trace";

static TEST_SETUP: Once = Once::new();

/// Routes coven spans and events into the test harness output.
///
/// Safe to call from every test; only the first call installs a subscriber,
/// and an already installed global subscriber is left in place.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();

        match installed {
            Ok(()) => tracing::info!(directive = DEFAULT_DIRECTIVE, "coven test tracing ready"),
            Err(e) => tracing::debug!("keeping existing subscriber: {}", e),
        }
    });
}
