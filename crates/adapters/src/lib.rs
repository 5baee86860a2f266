//! Host adapters for the gearauth application ports.

pub mod outbound;
