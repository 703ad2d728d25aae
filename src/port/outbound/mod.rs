//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe where snapshots come from and where summaries go.

pub mod snapshot;
pub mod summary;
