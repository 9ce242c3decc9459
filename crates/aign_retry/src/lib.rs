//! Bounded retry and configuration for AIGN.
//!
//! This crate provides:
//! - [`retry`]: count-bounded, fixed-interval retry around any fallible async call
//! - [`RetryPolicy`]: validated attempt cap and backoff
//! - [`AignConfig`]: TOML configuration with bundled defaults and user overrides
//!
//! # Example
//!
//! ```no_run
//! use aign_retry::{AignConfig, retry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AignConfig::load()?;
//! let policy = config.retry.policy()?;
//!
//! let value = retry(&policy, "ping", || async { Ok::<_, std::io::Error>(42) }).await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod policy;

pub use config::{
    AgentSettings, AgentsConfig, AignConfig, MemoryConfig, MemoryStrategy, ProviderConfig,
    RetryConfig,
};
pub use policy::{RetryPolicy, retry};
