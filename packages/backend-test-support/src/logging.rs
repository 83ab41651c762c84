//! Test logging shared by the backend's integration test binaries.
//!
//! Each binary calls [`init`] from a `#[ctor::ctor]` hook in
//! `tests/common/mod.rs`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a quiet subscriber once per process.
///
/// The level is taken from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
/// Output goes through the test writer so it is captured per test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn,actix_server=error"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok(); // Another subscriber may already be installed
    });
}
