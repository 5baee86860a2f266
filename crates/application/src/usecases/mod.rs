//! Application services implementing the jobs.

pub mod distribute_keys;
pub mod reconcile_users;

pub use distribute_keys::*;
pub use reconcile_users::*;

#[cfg(test)]
pub(crate) mod support;
