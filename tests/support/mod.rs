#![allow(dead_code)]

pub mod architecture;
pub mod book;
pub mod snapshot;
