//! Traits and implementations for routing DID registration operations to
//! method-specific drivers.

pub mod common_models;
pub mod driver;
pub mod extension;
pub mod request;
pub mod state;
pub mod util;
