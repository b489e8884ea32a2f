//! Pieces tests - shape table, movement and SRS rotation

use std::collections::HashSet;

use blockfall::core::{get_shape, Grid, Piece};
use blockfall::types::{MoveError, PieceKind, RotateDir, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

/// Grid with every cell filled except `open`.
fn walled_grid(open: &[(i8, i8)]) -> Grid {
    let mut grid = Grid::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if !open.contains(&(x, y)) {
                grid.set(x, y, Some(PieceKind::Z));
            }
        }
    }
    grid
}

#[test]
fn test_every_shape_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let cells: HashSet<_> = get_shape(kind, rotation).into_iter().collect();
            assert_eq!(cells.len(), 4, "{kind:?} {rotation:?}");
        }
    }
}

#[test]
fn test_o_is_the_same_in_every_rotation() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_spawn_anchor_and_orientation() {
    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(piece.rotation, Rotation::North);
    }
    let t = Piece::spawn(PieceKind::T).cells();
    assert_eq!(t, [(4, 0), (3, 1), (4, 1), (5, 1)]);
}

#[test]
fn test_four_rotations_restore_the_piece() {
    let grid = Grid::new();
    for kind in PieceKind::ALL {
        let start = Piece::new(kind, Rotation::North, 3, 8);
        let mut piece = start;
        for _ in 0..4 {
            piece = piece.rotated(RotateDir::Cw, &grid).unwrap();
        }
        assert_eq!(piece, start, "{kind:?} cw");

        let back = start
            .rotated(RotateDir::Cw, &grid)
            .and_then(|p| p.rotated(RotateDir::Ccw, &grid))
            .unwrap();
        assert_eq!(back, start, "{kind:?} cw+ccw");
    }
}

#[test]
fn test_shift_stops_at_walls() {
    let grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::I);
    for _ in 0..3 {
        piece = piece.shifted(-1, 0, &grid).unwrap();
    }
    assert_eq!(piece.x, 0);
    assert_eq!(piece.shifted(-1, 0, &grid), Err(MoveError::Blocked));
}

#[test]
fn test_shift_blocked_by_stack() {
    let grid = Grid::from_ascii(&["OO........", "OO........"]);
    let piece = Piece::new(PieceKind::O, Rotation::North, 1, 18);
    assert_eq!(piece.shifted(-1, 0, &grid), Err(MoveError::Blocked));
    assert!(piece.is_grounded(&grid));
}

#[test]
fn test_wall_kick_off_the_left_wall() {
    let grid = Grid::new();
    // East-facing T hugging the left wall: its stem column is x = 0.
    let piece = Piece::new(PieceKind::T, Rotation::East, -1, 5);
    assert!(piece.fits(&grid));

    let rotated = piece.rotated(RotateDir::Cw, &grid).unwrap();
    assert_eq!(rotated.rotation, Rotation::South);
    assert_eq!(rotated.x, 0);
    assert!(rotated.fits(&grid));
}

#[test]
fn test_rotation_fails_when_every_kick_is_blocked() {
    let piece = Piece::new(PieceKind::T, Rotation::North, 3, 8);
    let grid = walled_grid(&piece.cells());

    assert_eq!(piece.rotated(RotateDir::Cw, &grid), Err(MoveError::Blocked));
    assert_eq!(piece.rotated(RotateDir::Ccw, &grid), Err(MoveError::Blocked));
}

#[test]
fn test_drop_lands_on_stack() {
    let grid = Grid::from_ascii(&["..........", "IIII......"]);
    let piece = Piece::spawn(PieceKind::O);
    // O covers columns 4-5 which are empty down to the floor.
    assert_eq!(piece.dropped(&grid).y, 18);

    let piece = Piece::new(PieceKind::O, Rotation::North, 0, 0);
    // Columns 1-2 stop on row 19.
    assert_eq!(piece.drop_distance(&grid), 17);
}
