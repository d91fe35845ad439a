//! Legal move generation and move application.
//!
//! Moves are found by raycasting outward from every disc of the side to move:
//! a ray that crosses one or more opponent discs and stops on an empty square
//! makes that square a target, bracketing the crossed discs. Contributions
//! from every ray reaching the same target are merged into one [`Move`].

use once_cell::sync::Lazy;

use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Cell, Move, NUM_SQUARES, Position, Side, in_bounds};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every square, the squares walked in each direction up to the edge.
static RAYS: Lazy<Vec<[Vec<Position>; 8]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|index| {
            let origin = Position::from_index(index);
            std::array::from_fn(|dir| ray_from(origin, DIRECTIONS[dir]))
        })
        .collect()
});

fn ray_from(origin: Position, (dc, dr): (i32, i32)) -> Vec<Position> {
    let mut ray = Vec::new();
    let mut col = origin.col as i32 + dc;
    let mut row = origin.row as i32 + dr;
    while in_bounds(col, row) {
        ray.push(Position {
            col: col as u8,
            row: row as u8,
        });
        col += dc;
        row += dr;
    }
    ray
}

/// Returns every legal move for `side`, ordered by target square (row-major).
///
/// An empty result means `side` must pass.
pub fn generate_moves(board: &Board, side: Side) -> Vec<Move> {
    let me = Cell::from(side);
    let opp = Cell::from(side.opponent());
    let mut captures: [Vec<Position>; NUM_SQUARES] = std::array::from_fn(|_| Vec::new());

    for (index, rays) in RAYS.iter().enumerate() {
        if board.cell(Position::from_index(index)) != me {
            continue;
        }
        for ray in rays {
            if let Some((target, run)) = scan_ray(board, ray, opp) {
                captures[target.index()].extend_from_slice(run);
            }
        }
    }

    captures
        .into_iter()
        .enumerate()
        .filter(|(_, captured)| !captured.is_empty())
        .map(|(index, captured)| Move {
            target: Position::from_index(index),
            captured,
        })
        .collect()
}

/// Walks one ray over opponent discs. Yields the empty square that ends the
/// run together with the run itself, or `None` when the ray crosses nothing
/// or ends on an own disc or the edge.
fn scan_ray<'a>(
    board: &Board,
    ray: &'a [Position],
    opp: Cell,
) -> Option<(Position, &'a [Position])> {
    let crossed = ray.iter().take_while(|&&pos| board.cell(pos) == opp).count();
    if crossed == 0 {
        return None;
    }
    let end = *ray.get(crossed)?;
    if board.cell(end) == Cell::Empty {
        Some((end, &ray[..crossed]))
    } else {
        None
    }
}

/// Returns the legal move for `side` targeting `target`, if there is one.
pub fn move_at(board: &Board, side: Side, target: Position) -> Option<Move> {
    generate_moves(board, side)
        .into_iter()
        .find(|mv| mv.target == target)
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    !generate_moves(board, side).is_empty()
}

/// Produces a new board with `mv` played by `side`; the input is untouched.
///
/// Rejects off-board positions with `OutOfBounds`. Rejects moves that capture
/// nothing, target an occupied square, or claim to flip a square that is not
/// an opponent disc.
pub fn apply_move(board: &Board, mv: &Move, side: Side) -> Result<Board, EngineError> {
    if let Some(off) = std::iter::once(&mv.target)
        .chain(&mv.captured)
        .find(|pos| !pos.is_on_board())
    {
        return Err(EngineError::OutOfBounds {
            col: off.col as i32,
            row: off.row as i32,
        });
    }

    let invalid = |reason| EngineError::InvalidMove {
        col: mv.target.col,
        row: mv.target.row,
        reason,
    };

    if mv.captured.is_empty() {
        return Err(invalid("move captures nothing"));
    }
    if board.cell(mv.target) != Cell::Empty {
        return Err(invalid("target cell is occupied"));
    }
    let opp = Cell::from(side.opponent());
    if mv.captured.iter().any(|&pos| board.cell(pos) != opp) {
        return Err(invalid("captured cell does not hold an opponent disc"));
    }

    Ok(play_unchecked(board, mv, side))
}

/// Plays a move taken straight from [`generate_moves`] for the same board.
pub(crate) fn play_unchecked(board: &Board, mv: &Move, side: Side) -> Board {
    let mut next = *board;
    let me = Cell::from(side);
    next.put(mv.target, me);
    for &pos in &mv.captured {
        next.put(pos, me);
    }
    next
}
