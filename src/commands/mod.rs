//! Command implementations

pub mod replay;
pub mod simple;

pub use replay::{Move, ReplayConfig, ReplayResult, ReplayStep, replay};
pub use simple::run_simple;
