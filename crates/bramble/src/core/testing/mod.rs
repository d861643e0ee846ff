/// Harness for driving a canvas in tests.
pub mod harness;
/// Renderer that records what it is asked to paint.
pub mod render;
/// Instrumented widgets.
pub mod widgets;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Guards subscriber installation.
static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber filtered by `RUST_LOG`. Safe to
/// call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
