use thiserror::Error;

/// Errors produced by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("coordinate ({col}, {row}) is outside the 8x8 board")]
    OutOfBounds { col: i32, row: i32 },

    #[error("invalid move at ({col}, {row}): {reason}")]
    InvalidMove {
        col: u8,
        row: u8,
        reason: &'static str,
    },

    /// The side to move has no legal move and must pass.
    #[error("no legal move available")]
    NoLegalMove,

    #[error("pass is not allowed while a legal move exists")]
    PassNotAllowed,

    #[error("game is already over")]
    GameOver,

    #[error("board parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_coordinate() {
        let err = EngineError::OutOfBounds { col: 8, row: -1 };
        assert_eq!(err.to_string(), "coordinate (8, -1) is outside the 8x8 board");

        let err = EngineError::InvalidMove {
            col: 0,
            row: 0,
            reason: "target cell is occupied",
        };
        assert!(err.to_string().contains("target cell is occupied"));
    }
}
