//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Front-end values drawn next to the engine's own numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub high_score: u32,
}

/// Lays out the well, the side panel and the overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

/// Where the well landed on screen.
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
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let well = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', well);
        draw_border(fb, frame, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.draw_board_cell(fb, frame, x as i8, y as i8, kind),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
                        self.fill_cell(fb, frame, x as i8, y as i8, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                for (x, y) in active.ghost_cells(ghost_y) {
                    self.fill_cell(fb, frame, x, y, '░', ghost);
                }
            }
            for (x, y) in active.cells {
                self.draw_board_cell(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);

        if snap.game_over() {
            draw_overlay(fb, frame, 0, "GAME OVER");
            draw_overlay(fb, frame, 2, "any key: new game");
        } else if snap.paused {
            draw_overlay(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Bounding box of the bordered well, side panel excluded.
    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let panel_w = PANEL_WIDTH + 2;
        let x = viewport.width.saturating_sub(w + panel_w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;
        Frame { x, y, w, h }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Paint one board cell; cells outside the board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", hud.high_score.max(snap.score)),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_mini_piece(fb, panel_x, y + 1, snap.next(), false);
        let mut qx = panel_x;
        for kind in snap.next_queue.iter().skip(1) {
            qx = fb.put_str(qx, y + 4, kind.as_str(), value.dim()) + 1;
        }
        y += 6;

        fb.put_str(panel_x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => self.draw_mini_piece(fb, panel_x, y + 1, kind, !snap.can_hold),
            None => {
                fb.put_str(panel_x, y + 1, "-", value);
            }
        }
    }

    /// A spawn-orientation piece trimmed to its own bounding box.
    fn draw_mini_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dimmed: bool) {
        let shape = get_shape(kind, Rotation::North);
        let min_x = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_y = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);

        let mut style = CellStyle::new(piece_color(kind), SCREEN_BG);
        if dimmed {
            style = style.dim();
        }
        for (dx, dy) in shape {
            let px = x + ((dx - min_x) as u16) * self.cell_w;
            let py = y + (dy - min_y) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

/// Columns reserved right of the well.
const PANEL_WIDTH: u16 = 12;

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

/// Centered text `row_offset` rows below the middle of the well.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, row_offset: u16, text: &str) {
    let y = frame.y + frame.h / 2 + row_offset;
    let text_w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, y, text, style);
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
