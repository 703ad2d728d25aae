//! File-backed snapshot source and summary writer.

mod snapshot;
mod summary;

pub use snapshot::FileSnapshotSource;
pub use summary::JsonFileWriter;
