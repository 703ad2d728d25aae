//! Inbound adapters: the ways the service is driven.

pub mod cli;
