//! Block Blast (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `block_blast::{core,input,journal,term,types}`, and holds the runtime
//! configuration shared by the binaries.

pub mod autoplay;
pub mod config;

pub use block_blast_core as core;
pub use block_blast_input as input;
pub use block_blast_journal as journal;
pub use block_blast_term as term;
pub use block_blast_types as types;
