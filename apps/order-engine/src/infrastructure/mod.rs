//! Infrastructure layer: adapters and wiring.

pub mod cache;
pub mod container;
pub mod locking;
pub mod persistence;
