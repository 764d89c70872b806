//! Drag protocol: press on a tray piece, move with a live drop preview,
//! commit on release.
//!
//! The controller only reads the session. Turning a release into a placement
//! is the caller's job (see [`DragOutcome::Commit`]), so the session never
//! sees drag state.

use tracing::trace;

use crate::core::{DropPreview, GameSession, Phase};
use crate::types::{PieceInstance, SurfaceLayout};

/// Live drag, from press to release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub slot: usize,
    pub piece: PieceInstance,
    /// Last pointer position
    pub pointer: (f32, f32),
    /// Pointer position relative to the top-left of the grabbed piece
    pub press_offset: (f32, f32),
    /// Board cell under the pointer when legality was last computed
    pub target: (i32, i32),
    pub legal: bool,
}

/// What a release asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The last preview was legal
    Commit { slot: usize, row: i32, col: i32 },
    /// A drag was active but its target was illegal
    Cancel,
    /// Nothing was being dragged
    Idle,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.active.as_ref()
    }

    /// Begin a drag if the press lands on a filled tray slot.
    ///
    /// Ignored unless a tray is dealt and the game is not over.
    pub fn press(&mut self, session: &GameSession, layout: &SurfaceLayout, x: f32, y: f32) -> bool {
        if session.phase() != Phase::Dealt {
            return false;
        }
        let Some(slot) = layout.slot_at(x, y) else {
            return false;
        };
        let Some(piece) = session.piece_at(slot) else {
            return false;
        };

        let rect = layout.slots[slot];
        let target = layout.board.cell_at(x, y);
        self.active = Some(DragState {
            slot,
            piece,
            pointer: (x, y),
            press_offset: (x - rect.x as f32, y - rect.y as f32),
            target,
            legal: session.can_place(slot, target.0, target.1),
        });
        trace!(slot, piece = piece.key.as_str(), "drag started");
        true
    }

    /// Track the pointer. Legality is recomputed only when the target cell
    /// changes; returns true when it was.
    pub fn moved(&mut self, session: &GameSession, layout: &SurfaceLayout, x: f32, y: f32) -> bool {
        let Some(state) = self.active.as_mut() else {
            return false;
        };
        state.pointer = (x, y);

        let target = layout.board.cell_at(x, y);
        if target == state.target {
            return false;
        }
        state.target = target;
        state.legal = session.can_place(state.slot, target.0, target.1);
        true
    }

    /// Re-run legality for the current target after the board changed
    /// underneath the drag (a sweep fired, for example).
    pub fn revalidate(&mut self, session: &GameSession) {
        if let Some(state) = self.active.as_mut() {
            state.legal = session.can_place(state.slot, state.target.0, state.target.1);
        }
    }

    /// End the drag
    pub fn release(&mut self) -> DragOutcome {
        match self.active.take() {
            None => DragOutcome::Idle,
            Some(s) if s.legal => DragOutcome::Commit {
                slot: s.slot,
                row: s.target.0,
                col: s.target.1,
            },
            Some(_) => DragOutcome::Cancel,
        }
    }

    /// Drop the drag without committing; returns whether one was active
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn preview(&self) -> Option<DropPreview> {
        self.active.map(|s| DropPreview {
            row: s.target.0,
            col: s.target.1,
            can_place: s.legal,
            piece: s.piece,
        })
    }

    /// Where the top-left of the floating piece should be drawn
    pub fn floating_origin(&self) -> Option<(f32, f32)> {
        self.active
            .map(|s| (s.pointer.0 - s.press_offset.0, s.pointer.1 - s.press_offset.1))
    }
}
