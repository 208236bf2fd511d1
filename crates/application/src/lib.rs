//! Application layer - Use cases and orchestration
//!
//! Contains the gateway error taxonomy, the bounded-retry executor, port
//! definitions for the external providers, and the orchestration services
//! that the out-of-repo HTTP layer calls into.

pub mod error;
pub mod ports;
pub mod retry;
pub mod services;

pub use error::GatewayError;
pub use ports::*;
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use services::*;
