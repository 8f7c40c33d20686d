//! Shared utilities for the rig-rs CLI

pub mod table;
pub mod tree;

pub use table::*;
pub use tree::*;
