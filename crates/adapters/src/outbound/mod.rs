//! Outbound adapters.

pub mod accounts;
pub mod fs;
