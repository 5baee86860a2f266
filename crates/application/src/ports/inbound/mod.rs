//! Entry points offered to the job dispatch layer.

pub mod distribute_keys;
pub mod reconcile_users;

pub use distribute_keys::*;
pub use reconcile_users::*;
