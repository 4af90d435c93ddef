//! # Universe Connections
//!
//! Derives the jump-connection graph between systems from the links each
//! system declares. The analysis is a pure batch pass, so it can run on a
//! worker thread; the presenter applies its result on the interactive thread.

pub mod analyzer;
pub mod task;

pub use analyzer::{analyze, ConnectionPart, UniverseConnection};
pub use task::AnalysisTask;
