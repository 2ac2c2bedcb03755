//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ScoreRecord, TileColor, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Key help shown under the score.
pub const CONTROLS: [(&str, &str); 7] = [
    ("A/D", "move"),
    ("W", "rotate"),
    ("S", "soft drop"),
    ("SPACE", "hard drop"),
    ("Q", "new game"),
    ("E", "leaderboard"),
    ("ESC", "quit"),
];

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const LEADERBOARD_W: u16 = 36;

/// A lightweight terminal renderer for the game board.
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
        Self::new(2, 1)
    }
}

/// Top-left of the board frame plus its outer size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the board into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_leaderboard(snap, None, viewport, fb);
    }

    /// Render the board and, when `leaderboard` is set, the leaderboard overlay
    /// on top of it (the game is paused while it is shown).
    pub fn render_into_with_leaderboard(
        &self,
        snap: &GameSnapshot,
        leaderboard: Option<&[ScoreRecord]>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_px_h = BOARD_HEIGHT as u16 * self.cell_h;
        let w = board_px_w + 2;
        let h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            frame.x,
            frame.y,
            frame.w,
            frame.h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        // The active piece is already painted into the board.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                self.draw_tile(fb, frame, x as u16, y as u16, color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(entries) = leaderboard {
            draw_leaderboard(fb, viewport, entries);
        } else if snap.game_over() {
            draw_banner(fb, frame, &["GAME OVER", "Q: new game"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_leaderboard(
        &self,
        snap: &GameSnapshot,
        leaderboard: Option<&[ScoreRecord]>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_leaderboard(snap, leaderboard, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: TileColor) {
        let (ch, style) = match color {
            TileColor::Background => (
                '·',
                CellStyle {
                    dim: true,
                    ..CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG)
                },
            ),
            TileColor::Flash => (
                '█',
                CellStyle {
                    bold: true,
                    ..CellStyle::plain(color.into(), BOARD_BG)
                },
            ),
            _ => ('█', CellStyle::plain(color.into(), BOARD_BG)),
        };
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CONTROLS", label);
        for (key, what) in CONTROLS {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 7, y, what, dim);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines in the middle of the board frame.
fn draw_banner(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
    };
    let top = frame.y.saturating_add(frame.h / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, top.saturating_add(i as u16), text, style);
    }
}

fn draw_leaderboard(fb: &mut FrameBuffer, viewport: Viewport, entries: &[ScoreRecord]) {
    let w = LEADERBOARD_W.min(viewport.width);
    let h = (entries.len().max(1) as u16)
        .saturating_add(5)
        .min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    let bg = Rgb::new(10, 10, 20);
    let text = CellStyle::plain(Rgb::new(220, 220, 220), bg);
    let title = CellStyle { bold: true, ..text };
    let dim = CellStyle { dim: true, ..text };

    fb.fill_rect(x, y, w, h, ' ', text);
    draw_border(fb, x, y, w, h, text);
    fb.put_str(x + 2, y + 1, "LEADERBOARD (paused)", title);

    let mut row = y + 2;
    if entries.is_empty() {
        fb.put_str(x + 2, row, "no scores yet", dim);
        row += 1;
    }
    for (rank, entry) in entries.iter().enumerate() {
        if row + 2 >= y + h {
            break;
        }
        let cx = fb.put_u32(x + 2, row, rank as u32 + 1, dim);
        fb.put_char(cx, row, '.', dim);
        fb.put_u32(x + 6, row, entry.score, title);
        fb.put_str(x + 14, row, &entry.stamp, text);
        row += 1;
    }
    fb.put_str(x + 2, y + h.saturating_sub(2), "E: resume", dim);
}
