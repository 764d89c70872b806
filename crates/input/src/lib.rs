//! Terminal input module (session-facing).
//!
//! This crate is independent of any rendering backend. It maps `crossterm`
//! key and mouse events into [`crate::types::GameAction`] and
//! [`PointerEvent`], and runs the press / drag / release protocol that turns
//! pointer motion into placement commits.

pub mod drag;
pub mod map;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use drag::{DragController, DragOutcome, DragState};
pub use map::{handle_key_event, pointer_event, should_quit, PointerEvent};
