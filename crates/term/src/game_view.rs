//! GameView: maps a session snapshot and display grid into a terminal
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape_of, DisplayCell, DisplayGrid, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    BoardGeometry, Color, PieceInstance, SlotRect, SurfaceLayout, TraySlots, BOARD_HEIGHT,
    BOARD_WIDTH, TRAY_SIZE,
};

/// Largest catalog shape extent, in board cells.
const MAX_SHAPE_CELLS: u16 = 5;
/// Columns between tray slot boxes.
const SLOT_GAP: u16 = 2;
/// Columns between the play area and the side panel.
const PANEL_GAP: u16 = 3;
const PANEL_W: u16 = 14;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const WARNING_RGB: Rgb = Rgb::new(127, 29, 29);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Piece following the pointer during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingPiece {
    /// Tray slot the piece was lifted from (drawn ghosted)
    pub slot: usize,
    pub piece: PieceInstance,
    /// Top-left of the piece in terminal coordinates
    pub origin: (f32, f32),
}

/// Screen positions of everything the view draws for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLayout {
    /// Top-left of the board frame (border included)
    pub frame_x: u16,
    pub frame_y: u16,
    pub tray_y: u16,
    /// Left edge of each tray slot box
    pub slot_x: [u16; TRAY_SIZE],
    pub panel_x: u16,
    /// Hit-testing geometry for the pointer handler
    pub surface: SurfaceLayout,
}

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    fn slot_size(&self) -> (u16, u16) {
        (MAX_SHAPE_CELLS * self.cell_w, MAX_SHAPE_CELLS * self.cell_h)
    }

    /// Compute where the board, tray, and panel land in `viewport`.
    ///
    /// Slot hit rectangles cover the drawn piece only; an empty slot gets a
    /// zero-sized rectangle.
    pub fn layout(&self, tray: &TraySlots, viewport: Viewport) -> ViewLayout {
        let (frame_w, frame_h) = self.frame_size();
        let (slot_w, slot_h) = self.slot_size();
        let tray_w = slot_w * TRAY_SIZE as u16 + SLOT_GAP * (TRAY_SIZE as u16 - 1);
        let play_w = tray_w.max(frame_w);
        let content_w = play_w + PANEL_GAP + PANEL_W;
        let content_h = frame_h + 1 + slot_h;

        let origin_x = viewport.width.saturating_sub(content_w) / 2;
        let origin_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(content_h) / 2,
            AnchorY::Top => 0,
        };

        let frame_x = origin_x + (play_w - frame_w) / 2;
        let frame_y = origin_y;
        let tray_y = frame_y + frame_h + 1;
        let tray_x = origin_x + (play_w - tray_w) / 2;

        let mut slot_x = [0u16; TRAY_SIZE];
        let mut slots = [SlotRect::default(); TRAY_SIZE];
        for i in 0..TRAY_SIZE {
            slot_x[i] = tray_x + i as u16 * (slot_w + SLOT_GAP);
            if let Some(piece) = tray[i] {
                let shape = shape_of(piece.key);
                let w = shape.width() as u16 * self.cell_w;
                let h = shape.height() as u16 * self.cell_h;
                slots[i] = SlotRect {
                    x: slot_x[i] + (slot_w - w) / 2,
                    y: tray_y + (slot_h - h) / 2,
                    w,
                    h,
                };
            }
        }

        ViewLayout {
            frame_x,
            frame_y,
            tray_y,
            slot_x,
            panel_x: origin_x + play_w + PANEL_GAP,
            surface: SurfaceLayout {
                board: BoardGeometry {
                    left: (frame_x + 1) as f32,
                    top: (frame_y + 1) as f32,
                    cell_w: self.cell_w as f32,
                    cell_h: self.cell_h as f32,
                },
                slots,
            },
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        grid: &DisplayGrid,
        floating: Option<&FloatingPiece>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(&snap.tray, viewport);
        let (frame_w, frame_h) = self.frame_size();
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, layout.frame_x, layout.frame_y, frame_w, frame_h, border);

        let left = layout.frame_x + 1;
        let top = layout.frame_y + 1;
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (ch, style) = display_cell_style(*cell);
                let px = left + c as u16 * self.cell_w;
                let py = top + r as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        // Leftover pieces are ghosted once nothing can be committed.
        let dragged = floating.map(|f| f.slot);
        let playable = snap.playable();
        for (i, slot) in snap.tray.iter().enumerate() {
            if let Some(piece) = slot {
                let rect = layout.surface.slots[i];
                self.draw_piece(
                    fb,
                    rect.x as i32,
                    rect.y as i32,
                    *piece,
                    !playable || dragged == Some(i),
                );
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout.panel_x, layout.frame_y);

        if snap.game_over {
            self.draw_overlay_text(fb, &layout, 0, "GAME OVER");
            self.draw_overlay_text(fb, &layout, 1, "n: new game");
        } else if snap.episode_id == 0 {
            self.draw_overlay_text(fb, &layout, 0, "PRESS N");
        }

        // The floating piece goes on top of everything, overlay included.
        if let Some(f) = floating {
            let x = (f.origin.0 + 0.5).floor() as i32;
            let y = (f.origin.1 + 0.5).floor() as i32;
            self.draw_piece(fb, x, y, f.piece, false);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        grid: &DisplayGrid,
        floating: Option<&FloatingPiece>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, grid, floating, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for dx in x + 1..right {
            fb.put_char(dx, y, '─', style);
            fb.put_char(dx, bottom, '─', style);
        }
        for dy in y + 1..bottom {
            fb.put_char(x, dy, '│', style);
            fb.put_char(right, dy, '│', style);
        }
    }

    /// Draw a piece with its top-left at (x, y); off-screen parts are clipped.
    fn draw_piece(&self, fb: &mut FrameBuffer, x: i32, y: i32, piece: PieceInstance, ghosted: bool) {
        let rgb = palette_rgb(piece.color);
        let style = if ghosted {
            CellStyle::new(rgb.scaled(110), Rgb::new(0, 0, 0)).dim()
        } else {
            CellStyle::new(rgb, Rgb::new(0, 0, 0)).bold()
        };
        let ch = if ghosted { '░' } else { '█' };
        for (dy, dx) in shape_of(piece.key).cells() {
            fb.fill_rect_signed(
                x + dx as i32 * self.cell_w as i32,
                y + dy as i32 * self.cell_h as i32,
                self.cell_w,
                self.cell_h,
                ch,
                style,
            );
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_char(panel_x, y, '#', value);
        fb.put_u32(panel_x + 1, y, snap.episode_id, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TRAY", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces_left() as u32, value);
        fb.put_str(panel_x + 1, y, "/3", value);
        y = y.saturating_add(2);

        for line in ["drag: place", "n: new game", "esc: cancel", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &ViewLayout, line: u16, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let y = layout.frame_y + frame_h / 2 - 1 + line;
        let text_w = text.chars().count() as u16;
        let x = layout.frame_x + frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Terminal color for a palette entry.
pub fn palette_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(238, 73, 106),
        Color::Orange => Rgb::new(250, 158, 71),
        Color::Yellow => Rgb::new(255, 236, 61),
        Color::Green => Rgb::new(46, 204, 112),
        Color::Blue => Rgb::new(52, 152, 219),
        Color::Indigo => Rgb::new(124, 58, 237),
        Color::Violet => Rgb::new(234, 72, 196),
    }
}

fn display_cell_style(cell: DisplayCell) -> (char, CellStyle) {
    match cell {
        DisplayCell::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
        DisplayCell::Block {
            color,
            clearing: false,
        } => ('█', CellStyle::new(palette_rgb(color), BOARD_BG).bold()),
        DisplayCell::Block {
            clearing: true, ..
        } => ('▓', CellStyle::new(Rgb::new(245, 245, 245), BOARD_BG).bold()),
        DisplayCell::Preview { color, legal: true } => {
            ('▒', CellStyle::new(palette_rgb(color), BOARD_BG))
        }
        DisplayCell::Preview { legal: false, .. } => ('▒', CellStyle::new(WARNING_RGB, BOARD_BG)),
    }
}
