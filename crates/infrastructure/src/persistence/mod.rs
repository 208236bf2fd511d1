//! Durable persistence
//!
//! The gateway's only durable record is the single OAuth2 credential set,
//! stored as a JSON file next to the deployment.

mod credential_store;

pub use credential_store::FileCredentialStore;
