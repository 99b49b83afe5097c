//! Reference [`Store`](crate::Store) implementations.

pub mod memory;
pub mod moka;
pub mod redis;
