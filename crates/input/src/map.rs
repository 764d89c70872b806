//! Mapping from terminal events to game actions and pointer events.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Pointer event in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release { x: f32, y: f32 },
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(GameAction::NewGame)
        }
        KeyCode::Esc => Some(GameAction::CancelDrag),
        _ => None,
    }
}

/// Map mouse input to pointer events.
///
/// Only the left button drives the drag protocol. Plain motion is reported
/// as a move so terminals that send motion without a held button still
/// update the preview.
pub fn pointer_event(ev: MouseEvent) -> Option<PointerEvent> {
    let (x, y) = (ev.column as f32, ev.row as f32);
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Press { x, y }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::Move { x, y })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Release { x, y }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
