//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the puzzle: the piece catalog, the 10x10
//! board, placement legality, line clearing and scoring, tray dealing, the
//! deferred sweep and refill timers, and the session that ties them together.
//! It has no dependency on terminal, input, or file I/O.
//!
//! # Module Structure
//!
//! - [`pieces`]: The fixed catalog of 19 block shapes
//! - [`board`]: 10x10 grid of cells with clearing flags
//! - [`legality`]: Placement checks and game-over detection
//! - [`scoring`]: Full-line detection and line points
//! - [`rng`]: Seeded dealing of tray pieces
//! - [`schedule`]: Deferred clear sweep and tray refill timers
//! - [`session`]: Turn structure and score bookkeeping
//! - [`display`]: Board plus drag preview as a render-ready grid
//! - [`snapshot`]: Read-only session copy for observers
//!
//! # Rules
//!
//! - A placement scores one point per cell placed
//! - Full rows and columns are detected at once and flagged clearing
//! - Flagged cells are emptied 300ms later
//! - Line points: `n * 10`, plus `n * (n + 1) / 2 * 5` when n >= 2
//! - A fresh tray of 3 is dealt 200ms after the last piece is played
//! - The game ends when no tray piece fits anywhere on the board
//!
//! # Example
//!
//! ```
//! use block_blast_core::{GameSession, SessionConfig};
//!
//! let mut session = GameSession::with_config(12345, SessionConfig::immediate());
//! session.start_session();
//!
//! let piece = session.piece_at(0).unwrap();
//! let (row, col) = block_blast_core::legality::first_fit(session.board(), piece.key).unwrap();
//! let outcome = session.commit_placement(0, row, col).unwrap();
//!
//! assert!(outcome.cells_placed > 0);
//! assert_eq!(session.score(), outcome.score_delta());
//! ```
//!
//! # Timing
//!
//! Deferred work advances only through
//! [`GameSession::tick`](session::GameSession::tick), called every frame with
//! the elapsed milliseconds.

pub mod board;
pub mod display;
pub mod legality;
pub mod pieces;
pub mod rng;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use block_blast_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullLines};
pub use display::{display_grid, DisplayCell, DisplayGrid, DropPreview};
pub use legality::{can_place, first_fit, is_game_over};
pub use pieces::{shape_of, Shape};
pub use rng::{deal_piece, deal_tray, SimpleRng};
pub use schedule::{Schedule, TaskKind};
pub use scoring::{clear_lines, clear_lines_in_place, line_clear_points, LineClear};
pub use session::{CommitOutcome, GameSession, Phase, PlaceError, SessionConfig};
pub use snapshot::SessionSnapshot;
