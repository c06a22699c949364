//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - HTTP-boundary error type
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult, ok};
