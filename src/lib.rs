//! Stackfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `stackfall::{core,input,term,types}` for the binary, the integration
//! tests and the benchmarks.

pub use stackfall_core as core;
pub use stackfall_input as input;
pub use stackfall_term as term;
pub use stackfall_types as types;
