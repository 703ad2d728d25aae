//! Adapters connecting the service to the outside world.
//!
//! - [`inbound`] - Command line entry points
//! - [`outbound`] - Snapshot and summary file implementations of the ports

pub mod inbound;
pub mod outbound;
