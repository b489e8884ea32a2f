//! Grid tests - bounds, placement and row clearing

use blockfall::core::Grid;
use blockfall::types::{GridError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.is_occupied(x, y), Ok(false), "cell ({x}, {y})");
            assert!(grid.is_free(x, y));
        }
    }
}

#[test]
fn test_is_occupied_rejects_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(
        grid.is_occupied(-1, 0),
        Err(GridError::OutOfBounds { x: -1, y: 0 })
    );
    assert_eq!(
        grid.is_occupied(0, BOARD_HEIGHT as i8),
        Err(GridError::OutOfBounds { x: 0, y: 20 })
    );
}

#[test]
fn test_out_of_bounds_is_never_free() {
    let grid = Grid::new();
    assert!(!grid.is_free(-1, 5));
    assert!(!grid.is_free(BOARD_WIDTH as i8, 5));
    assert!(!grid.is_free(5, BOARD_HEIGHT as i8));
}

#[test]
fn test_place_marks_cells_with_kind() {
    let mut grid = Grid::new();
    grid.place(&[(0, 19), (1, 19), (2, 19), (1, 18)], PieceKind::T)
        .unwrap();

    assert_eq!(grid.get(1, 18), Some(Some(PieceKind::T)));
    assert_eq!(grid.is_occupied(2, 19), Ok(true));
    assert_eq!(grid.occupied_count(), 4);
}

#[test]
fn test_place_out_of_bounds_changes_nothing() {
    let mut grid = Grid::from_ascii(&["J........."]);
    let before = grid.clone();

    let result = grid.place(&[(8, 0), (9, 0), (10, 0), (9, 1)], PieceKind::S);
    assert_eq!(result, Err(GridError::OutOfBounds { x: 10, y: 0 }));
    assert_eq!(grid, before);
}

#[test]
fn test_clear_no_full_rows() {
    let mut grid = Grid::from_ascii(&["IIIIIIIII.", "OO......OO"]);
    let before = grid.clone();
    assert!(grid.clear_full_rows().is_empty());
    assert_eq!(grid, before);
}

#[test]
fn test_clear_single_bottom_row() {
    let mut grid = Grid::from_ascii(&["T.........", "LLLLLLLLLL"]);
    let cleared = grid.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(grid.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_clear_four_rows_at_once() {
    let mut grid = Grid::from_ascii(&[
        ".Z........",
        "IIIIIIIIII",
        "JJJJJJJJJJ",
        "SSSSSSSSSS",
        "OOOOOOOOOO",
    ]);
    let cleared = grid.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19, 18, 17, 16]);
    assert_eq!(grid.get(1, 19), Some(Some(PieceKind::Z)));
    assert_eq!(grid.stack_height(), 1);
}

#[test]
fn test_clear_preserves_order_and_colors_of_survivors() {
    let mut grid = Grid::from_ascii(&[
        "S.........",
        "ZZZZZZZZZZ",
        ".T........",
        "OOOOOOOOOO",
        "..J.......",
    ]);
    let before = grid.occupied_count();
    let cleared = grid.clear_full_rows();

    assert_eq!(cleared.len(), 2);
    assert_eq!(grid.occupied_count(), before - cleared.len() * BOARD_WIDTH as usize);
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!grid.is_row_full(y));
    }

    // Survivors, bottom up: J, T, S.
    assert_eq!(grid.get(2, 19), Some(Some(PieceKind::J)));
    assert_eq!(grid.get(1, 18), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(0, 17), Some(Some(PieceKind::S)));
}

#[test]
fn test_row_accessor() {
    let grid = Grid::from_ascii(&["I........L"]);
    let row = grid.row(19).unwrap();
    assert_eq!(row.len(), BOARD_WIDTH as usize);
    assert_eq!(row[0], Some(PieceKind::I));
    assert_eq!(row[9], Some(PieceKind::L));
    assert!(grid.row(BOARD_HEIGHT as usize).is_none());
}
