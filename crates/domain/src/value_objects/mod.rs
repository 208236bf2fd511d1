//! Value Objects - Immutable, identity-less domain primitives

mod credential_set;
mod render_target;
mod unit_system;
mod viewport;

pub use credential_set::CredentialSet;
pub use render_target::{OVERSCAN_FACTOR, RenderTarget};
pub use unit_system::UnitSystem;
pub use viewport::{MediaDimensions, Viewport};
