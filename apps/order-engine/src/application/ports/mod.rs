//! Driven ports: interfaces the core calls out through.

mod venue;

pub use venue::{ExecutionVenueClient, NoOpVenueClient, VenueError};
