//! Shared types for the Conch order-tracking platform
//!
//! Domain records and their Create/Update payloads, used by the track
//! server and by API clients. Everything here is plain data: business
//! rules live in the server crates.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
