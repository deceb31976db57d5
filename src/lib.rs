//! Match-3 puzzle rules engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `match3::{core,engine,types}` and owns the headless
//! bot runner and its configuration.

pub mod config;

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
