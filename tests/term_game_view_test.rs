//! GameView tests - what ends up on screen for a given snapshot

use blockfall::core::{Bag, GameSnapshot, GameState, Grid, Rules};
use blockfall::term::{piece_color, FrameBuffer, GameView, Hud, Viewport};
use blockfall::types::{InputIntent, PieceKind};

const VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

fn render(snap: &GameSnapshot, hud: Hud) -> FrameBuffer {
    GameView::default().render(snap, &hud, VIEWPORT)
}

fn count_glyphs_with_color(fb: &FrameBuffer, ch: char, kind: PieceKind) -> usize {
    fb.cells()
        .iter()
        .filter(|c| c.ch == ch && c.style.fg == piece_color(kind))
        .count()
}

fn started(pieces: &[PieceKind]) -> GameState {
    let mut game = GameState::from_parts(Grid::new(), Bag::scripted(pieces), Rules::default());
    game.start();
    game
}

#[test]
fn test_panel_shows_score_level_lines_and_high() {
    let game = started(&[PieceKind::T]);
    let fb = render(&game.snapshot(), Hud { high_score: 9_876 });

    for label in ["SCORE", "LEVEL", "LINES", "HIGH", "NEXT", "HOLD"] {
        assert!(fb.contains_text(label), "missing {label}");
    }
    assert!(fb.contains_text("9876"));
}

#[test]
fn test_active_piece_and_ghost_are_drawn() {
    let game = started(&[PieceKind::L, PieceKind::O]);
    let fb = render(&game.snapshot(), Hud::default());

    // 4 cells, 2 columns each.
    assert_eq!(count_glyphs_with_color(&fb, '█', PieceKind::L), 8);
    let ghost = fb.cells().iter().filter(|c| c.ch == '░').count();
    assert_eq!(ghost, 8);
}

#[test]
fn test_next_piece_is_drawn_as_mini_piece() {
    let game = started(&[PieceKind::T, PieceKind::O]);
    let fb = render(&game.snapshot(), Hud::default());

    // Only the NEXT preview uses the O color.
    assert_eq!(count_glyphs_with_color(&fb, '█', PieceKind::O), 8);
}

#[test]
fn test_locked_cells_are_drawn() {
    let mut game = started(&[PieceKind::I, PieceKind::T, PieceKind::O]);
    game.apply_input(InputIntent::HardDrop);
    let fb = render(&game.snapshot(), Hud::default());

    // Locked I on the floor; I is no longer previewed.
    assert_eq!(count_glyphs_with_color(&fb, '█', PieceKind::I), 8);
}

#[test]
fn test_overlays() {
    let mut game = started(&[PieceKind::S]);
    game.toggle_pause();
    let fb = render(&game.snapshot(), Hud::default());
    assert!(fb.contains_text("PAUSED"));

    let mut game = started(&[PieceKind::O]);
    while !game.is_game_over() {
        game.apply_input(InputIntent::HardDrop);
    }
    let fb = render(&game.snapshot(), Hud::default());
    assert!(fb.contains_text("GAME OVER"));
    assert!(!fb.contains_text("PAUSED"));
}

#[test]
fn test_tiny_viewport_does_not_panic() {
    let game = started(&[PieceKind::Z]);
    let fb = GameView::default().render(&game.snapshot(), &Hud::default(), Viewport::new(5, 3));
    assert_eq!(fb.width(), 5);
    assert_eq!(fb.height(), 3);
}
