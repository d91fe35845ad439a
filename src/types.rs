use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// State of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Flat snapshot encoding: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    /// Returns the side owning this cell, `None` when empty.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::Black),
            'O' => Some(Cell::White),
            _ => None,
        }
    }
}

/// One of the two players. Empty is not a side; every side has an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Player id used in snapshots: 1=black, 2=white.
    pub fn code(self) -> u8 {
        Cell::from(self).code()
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// A board coordinate, both axes in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Result<Self, EngineError> {
        if !in_bounds(col, row) {
            return Err(EngineError::OutOfBounds { col, row });
        }
        Ok(Self {
            col: col as u8,
            row: row as u8,
        })
    }

    /// Row-major square index (0..=63). Panics when the position is off
    /// the board.
    pub fn index(self) -> usize {
        assert!(
            (self.col as usize) < BOARD_SIZE && (self.row as usize) < BOARD_SIZE,
            "position off the board: {self:?}"
        );
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn is_on_board(self) -> bool {
        in_bounds(self.col as i32, self.row as i32)
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES, "square index out of range: {index}");
        Self {
            col: (index % BOARD_SIZE) as u8,
            row: (index / BOARD_SIZE) as u8,
        }
    }
}

pub(crate) fn in_bounds(col: i32, row: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&col) && (0..BOARD_SIZE as i32).contains(&row)
}

/// A legal play: the disc placed at `target` plus the opponent discs it flips.
///
/// `captured` never contains `target`; applying a move always sets the target
/// in addition to every captured square. A move produced by the generator
/// always has at least one captured square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub target: Position,
    pub captured: Vec<Position>,
}

impl Move {
    pub fn flip_count(&self) -> usize {
        self.captured.len()
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cell codes, see [`Cell::code`].
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped squares (0..=63), target excluded.
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over. `winner` is 0 on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_swaps_sides() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent().opponent(), Side::Black);
    }

    #[test]
    fn empty_cell_has_no_side() {
        assert_eq!(Cell::Empty.side(), None);
        assert_eq!(Cell::Black.side(), Some(Side::Black));
        assert_eq!(Cell::from(Side::White), Cell::White);
    }

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(EngineError::OutOfBounds { col: 8, row: 0 })
        );
        assert!(Position::new(-1, 3).is_err());
        assert!(Position::new(3, 8).is_err());

        let pos = Position::new(2, 3).unwrap();
        assert_eq!(pos.index(), 26);
        assert_eq!(Position::from_index(26), pos);
    }

    #[test]
    #[should_panic(expected = "position off the board")]
    fn index_of_off_board_position_panics() {
        let _ = Position { col: 11, row: 2 }.index();
    }

    #[test]
    fn symbols_round_trip_through_cells() {
        for cell in [Cell::Empty, Cell::Black, Cell::White] {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
        assert_eq!(Cell::from_symbol('?'), None);
    }
}
