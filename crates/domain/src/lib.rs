//! Core domain for the gearauth access layer.

pub mod error;
pub mod gear;
pub mod key;
