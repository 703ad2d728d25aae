//! Application services: snapshot translation, evaluation and polling.

pub mod analyzer;
pub mod debug;
pub mod translate;
pub mod watcher;

pub use analyzer::Analyzer;
pub use watcher::{PollOutcome, Watcher};
