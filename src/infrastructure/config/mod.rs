//! Infrastructure configuration modules.

pub mod liquidity;
pub mod logging;
pub mod service;
pub mod settings;
