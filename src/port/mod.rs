//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │        Service          │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────┐                                         ┌───────────┐
//! │ Snapshot │                                         │  Summary  │
//! │  Source  │                                         │  Writer   │
//! └──────────┘                                         └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`SnapshotSource`] - Where market snapshots come from
//! - [`SummaryWriter`] - Where evaluated summaries are published

pub mod outbound;

pub use outbound::snapshot::SnapshotSource;
pub use outbound::summary::SummaryWriter;
