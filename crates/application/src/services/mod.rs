//! Application services - Use case implementations

mod gateway;
mod token_lifecycle;

pub use gateway::{GatewayService, MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, SizedMediaItem};
pub use token_lifecycle::TokenLifecycleManager;
