//! Piece tests - spawn layouts, lowering, hard drop, rotation and moves

use blockfall::core::piece::spawn_cells;
use blockfall::core::{Grid, Piece, Pos};
use blockfall::types::{PieceKind, TileColor};

fn pos(x: i32, y: i32) -> Pos {
    Pos::new(x, y).unwrap()
}

fn coords(piece: &Piece) -> Vec<(u8, u8)> {
    piece.cells().iter().map(|p| (p.x(), p.y())).collect()
}

// ============== Spawn ==============

#[test]
fn test_every_kind_can_lower_after_spawn_on_empty_grid() {
    for kind in PieceKind::ALL {
        let mut grid = Grid::new();
        let piece = Piece::spawn(kind, &mut grid).unwrap();
        assert!(piece.can_lower(&grid), "{:?} should be able to lower", kind);
        assert_eq!(piece.base(), pos(4, 0));
        for cell in piece.cells() {
            assert_eq!(grid.cell(*cell).color, kind.color());
        }
    }
}

#[test]
fn test_spawn_layouts() {
    let expect = [
        (PieceKind::I, [(4, 0), (3, 0), (5, 0), (6, 0)]),
        (PieceKind::O, [(4, 0), (4, 1), (5, 0), (5, 1)]),
        (PieceKind::T, [(4, 0), (3, 0), (5, 0), (4, 1)]),
        (PieceKind::S, [(4, 0), (3, 1), (4, 1), (5, 0)]),
        (PieceKind::Z, [(4, 0), (3, 0), (4, 1), (5, 1)]),
        (PieceKind::J, [(4, 0), (3, 0), (5, 0), (5, 1)]),
        (PieceKind::L, [(4, 0), (3, 0), (3, 1), (5, 0)]),
    ];
    for (kind, cells) in expect {
        let got: Vec<(u8, u8)> = spawn_cells(kind)
            .unwrap()
            .iter()
            .map(|p| (p.x(), p.y()))
            .collect();
        assert_eq!(got, cells.to_vec(), "{:?}", kind);
    }
}

#[test]
fn test_spawn_onto_terrain_fails_without_painting() {
    let mut grid = Grid::new();
    grid.set_cell(pos(6, 0), TileColor::Red);
    grid.drain_changes();

    assert!(Piece::spawn(PieceKind::I, &mut grid).is_none());
    assert_eq!(grid.pending_changes(), 0);
    // T does not touch (6, 0).
    assert!(Piece::spawn(PieceKind::T, &mut grid).is_some());
}

// ============== Lower / hard drop ==============

#[test]
fn test_hard_drop_is_idempotent() {
    for kind in PieceKind::ALL {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(kind, &mut grid).unwrap();

        assert!(piece.hard_drop(&mut grid) > 0);
        let landed = coords(&piece);
        assert!(!piece.can_lower(&grid));

        assert_eq!(piece.hard_drop(&mut grid), 0);
        assert_eq!(coords(&piece), landed);
    }
}

#[test]
fn test_hard_drop_lands_on_terrain() {
    let mut grid = Grid::from_rows(&["....#.....", "##########"], TileColor::Blue);
    let mut piece = Piece::spawn(PieceKind::T, &mut grid).unwrap();

    // T's stem at (4, y+1) stops on the block at (4, 18).
    assert_eq!(piece.hard_drop(&mut grid), 16);
    assert_eq!(coords(&piece), vec![(4, 16), (3, 16), (5, 16), (4, 17)]);
}

#[test]
fn test_lower_repaints_old_cells_empty() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::J, &mut grid).unwrap();
    piece.lower(&mut grid);

    assert!(!grid.is_taken(pos(3, 0)));
    assert!(!grid.is_taken(pos(4, 0)));
    assert!(grid.is_taken(pos(5, 1)));
    assert!(grid.is_taken(pos(5, 2)));
    assert_eq!(grid.cell(pos(4, 1)).color, TileColor::Blue);
}

// ============== Rotation ==============

#[test]
fn test_o_rotation_is_a_no_op() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::O, &mut grid).unwrap();
    piece.lower(&mut grid);
    let before = coords(&piece);

    for _ in 0..4 {
        assert!(!piece.rotate(&mut grid));
        assert_eq!(coords(&piece), before);
    }
}

#[test]
fn test_rotation_through_own_cells_is_allowed() {
    // T at base (4,1): the stem (4,2) rotates onto (3,1), which the piece owns.
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::T, &mut grid).unwrap();
    piece.lower(&mut grid);

    assert!(piece.rotate(&mut grid));
    assert_eq!(coords(&piece), vec![(4, 1), (4, 0), (4, 2), (3, 1)]);

    let taken: usize = (0..20)
        .map(|y| grid.row(y).iter().filter(|c| c.taken).count())
        .sum();
    assert_eq!(taken, 4);
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in [PieceKind::I, PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(kind, &mut grid).unwrap();
        for _ in 0..5 {
            piece.lower(&mut grid);
        }
        let start = coords(&piece);
        for _ in 0..4 {
            assert!(piece.rotate(&mut grid), "{:?}", kind);
        }
        assert_eq!(coords(&piece), start);
    }
}

#[test]
fn test_blocked_rotation_changes_nothing() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::I, &mut grid).unwrap();
    // At spawn the I would rotate above row 0.
    assert!(!piece.rotate(&mut grid));
    assert_eq!(coords(&piece), vec![(4, 0), (3, 0), (5, 0), (6, 0)]);
}

// ============== Moves ==============

#[test]
fn test_moves_stop_at_walls() {
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::O, &mut grid).unwrap();

    let mut steps = 0;
    while piece.move_left(&mut grid) {
        steps += 1;
    }
    assert_eq!(steps, 4);
    assert_eq!(piece.owned_columns().as_slice(), &[0, 1]);

    steps = 0;
    while piece.move_right(&mut grid) {
        steps += 1;
    }
    assert_eq!(steps, 8);
    assert_eq!(piece.owned_columns().as_slice(), &[8, 9]);
}

#[test]
fn test_move_over_own_cells() {
    // I moving right steps onto its own (5,0) and (6,0).
    let mut grid = Grid::new();
    let mut piece = Piece::spawn(PieceKind::I, &mut grid).unwrap();
    assert!(piece.move_right(&mut grid));
    assert_eq!(piece.owned_columns().as_slice(), &[4, 5, 6, 7]);
    assert!(!grid.is_taken(pos(3, 0)));
}
