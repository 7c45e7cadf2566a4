//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Safe to call more than once; later calls
/// leave the first logger in place.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize logging for tests, capturing output per test
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
