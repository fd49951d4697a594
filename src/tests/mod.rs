//! Test suite for the typed-props crate
//!
//! Covers the properties parser, every setting codec, the load/validate
//! contract, and the Configuration caching and memoization behavior, with
//! in-memory source fixtures that count physical reads.


/// Test environment initialization
pub mod setup {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize tracing for tests
    pub fn init() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .init();
        });
    }
}
