use std::fmt;

use crate::error::EngineError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Side};

const SEPARATOR: &str = "--------";

/// Reversi board state: 64 cells in row-major order.
///
/// The board is `Copy`, so handing it to a search branch duplicates every
/// cell and sibling branches never observe each other's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (4,4)=white, (3,4)=black, (4,3)=black.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.put(Position { col: 3, row: 3 }, Cell::White);
        board.put(Position { col: 4, row: 4 }, Cell::White);
        board.put(Position { col: 3, row: 4 }, Cell::Black);
        board.put(Position { col: 4, row: 3 }, Cell::Black);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    pub fn get(&self, col: i32, row: i32) -> Result<Cell, EngineError> {
        Ok(self.cell(Position::new(col, row)?))
    }

    /// Overwrites a cell without any legality check.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> Result<(), EngineError> {
        self.put(Position::new(col, row)?, cell);
        Ok(())
    }

    /// Reads a cell by position. Panics on an off-board position.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Number of cells holding `cell`. Counts over all three values sum to 64.
    pub fn count(&self, cell: Cell) -> u8 {
        self.cells.iter().filter(|&&c| c == cell).count() as u8
    }

    /// Disc count for one side: the static evaluation used by search.
    pub fn disc_count(&self, side: Side) -> u8 {
        self.count(side.into())
    }

    pub fn empty_count(&self) -> u8 {
        self.count(Cell::Empty)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        self.cells.map(Cell::code)
    }

    /// Parses the text produced by `Display`. Separator dashes and
    /// whitespace are ignored; every other character must be a cell symbol.
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        let mut board = Self::empty();
        let mut index = 0usize;

        for ch in text.chars().filter(|ch| *ch != '-' && !ch.is_whitespace()) {
            let cell = Cell::from_symbol(ch)
                .ok_or_else(|| EngineError::Parse(format!("unexpected character {ch:?}")))?;
            if index >= NUM_SQUARES {
                return Err(EngineError::Parse(format!(
                    "too many cells: expected {NUM_SQUARES}"
                )));
            }
            board.cells[index] = cell;
            index += 1;
        }

        if index != NUM_SQUARES {
            return Err(EngineError::Parse(format!(
                "too few cells: expected {NUM_SQUARES}, got {index}"
            )));
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        for row in self.cells.chunks(BOARD_SIZE) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}
