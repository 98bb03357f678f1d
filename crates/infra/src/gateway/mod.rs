//! sevDesk API gateway
//!
//! Thin HTTP boundary around the remote accounting API: wire
//! conversion, authentication, response classification and a shared
//! minimum-interval request gate. No retry logic lives here.

pub mod client;
pub mod credentials;
pub mod gate;
pub mod wire;

pub use client::SevdeskGateway;
pub use credentials::{CredentialProvider, StaticApiKey};
pub use gate::RequestGate;
