//! Shared test utilities.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockChatDriver, MockResponse};

use aign_retry::{AignConfig, MemoryStrategy};

/// Bundled configuration with a short retry budget and 1 ms backoff.
#[allow(dead_code)]
pub fn fast_config(strategy: MemoryStrategy) -> AignConfig {
    let mut config = AignConfig::bundled().expect("bundled config is valid");
    config.retry.max_attempts = 3;
    config.retry.backoff_ms = 1;
    config.memory.strategy = strategy;
    config
}
