//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views paint into a plain
//! framebuffer, and the renderer flushes only what changed. No widget
//! toolkit sits in between, so board cells can be exactly 2 columns by
//! 1 row.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette_rgb, AnchorY, FloatingPiece, GameView, ViewLayout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
