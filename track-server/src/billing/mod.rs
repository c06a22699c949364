//! Billing Module
//!
//! Per-location usage counters and the per-business usage report.

pub mod usage;

pub use usage::{LocationUsage, UsageLedger, UsageReport};
