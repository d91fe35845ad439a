use crate::ai::search::{SearchConfig, SearchSelector, Searcher};
use crate::board::Board;
use crate::error::EngineError;
use crate::moves::{apply_move, generate_moves, has_legal_move, move_at};
use crate::types::{Cell, GameResult, GameState, Move, Position, Side};

/// Chooses a move for the side to play.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move> {
        generate_moves(board, side).into_iter().next()
    }
}

/// Turn-by-turn driver: tracks the side to move, passes and game end.
pub struct Game {
    board: Board,
    current: Side,
    is_game_over: bool,
    is_pass: bool,
    flipped: Vec<u8>,
    config: SearchConfig,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self::with_config(SearchConfig::default(), selector)
    }

    /// The config drives [`Game::best_score`]; search-backed selectors
    /// should be built from the same value.
    pub fn with_config(config: SearchConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current: Side::Black,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            config,
            selector,
        }
    }

    pub fn with_search(config: SearchConfig) -> Self {
        Self::with_config(config, Box::new(SearchSelector::new(config)))
    }

    pub fn new_with_default_selector() -> Self {
        Self::new(Box::new(FirstLegalMoveSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Search score of the current position for the side to move.
    pub fn best_score(&self) -> i32 {
        Searcher::new(self.config)
            .score(&self.board, self.current)
            .score
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Plays for the side to move at `(col, row)`.
    pub fn play(&mut self, col: i32, row: i32) -> Result<(), EngineError> {
        self.ensure_running()?;

        let target = Position::new(col, row)?;
        if self.board.cell(target) != Cell::Empty {
            return Err(EngineError::InvalidMove {
                col: target.col,
                row: target.row,
                reason: "target cell is occupied",
            });
        }
        let mv = move_at(&self.board, self.current, target).ok_or(EngineError::InvalidMove {
            col: target.col,
            row: target.row,
            reason: "no opponent disc is bracketed",
        })?;

        self.apply(&mv)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        has_legal_move(&self.board, self.current)
    }

    /// Passes the turn. Only allowed when the side to move has no legal move;
    /// ends the game when the opponent has none either.
    pub fn pass(&mut self) -> Result<(), EngineError> {
        self.ensure_running()?;
        if self.has_legal_moves_for_current() {
            return Err(EngineError::PassNotAllowed);
        }

        self.is_pass = true;
        self.flipped.clear();
        self.current = self.current.opponent();

        if !self.has_legal_moves_for_current() {
            self.end_game();
        }
        Ok(())
    }

    pub fn end_game(&mut self) {
        self.is_game_over = true;
    }

    /// Lets the selector play for the side to move.
    pub fn do_ai_move(&mut self) -> Result<(), EngineError> {
        self.ensure_running()?;

        let legal = generate_moves(&self.board, self.current);
        if legal.is_empty() {
            return Err(EngineError::NoLegalMove);
        }

        let selected = self
            .selector
            .select_move(&self.board, self.current)
            .ok_or(EngineError::NoLegalMove)?;
        if !legal.contains(&selected) {
            return Err(EngineError::InvalidMove {
                col: selected.target.col,
                row: selected.target.row,
                reason: "selector chose an illegal move",
            });
        }

        self.apply(&selected)
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        generate_moves(&self.board, self.current)
            .into_iter()
            .map(|mv| mv.target)
            .collect()
    }

    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current.code(),
            black_count: self.board.count(Cell::Black),
            white_count: self.board.count(Cell::White),
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn result(&self) -> GameResult {
        let black_count = self.board.count(Cell::Black);
        let white_count = self.board.count(Cell::White);
        GameResult {
            winner: if black_count > white_count {
                Side::Black.code()
            } else if white_count > black_count {
                Side::White.code()
            } else {
                0
            },
            black_count,
            white_count,
        }
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    fn apply(&mut self, mv: &Move) -> Result<(), EngineError> {
        self.board = apply_move(&self.board, mv, self.current)?;

        self.is_pass = false;
        self.flipped = mv.captured.iter().map(|pos| pos.index() as u8).collect();
        self.current = self.current.opponent();

        if self.board.empty_count() == 0
            || (!has_legal_move(&self.board, Side::Black)
                && !has_legal_move(&self.board, Side::White))
        {
            self.end_game();
        }

        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: Side) {
        self.board = board;
        self.current = current;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::search::best_score;
    use crate::types::NUM_SQUARES;

    struct FixedMoveSelector {
        target: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, board: &Board, side: Side) -> Option<Move> {
            move_at(board, side, self.target)
        }
    }

    struct IllegalMoveSelector;

    impl MoveSelector for IllegalMoveSelector {
        fn select_move(&self, _board: &Board, _side: Side) -> Option<Move> {
            Some(Move {
                target: Position { col: 0, row: 0 },
                captured: vec![Position { col: 1, row: 1 }],
            })
        }
    }

    /// Board filled with `fill` except for the listed `(index, cell)` squares.
    fn filled(fill: Cell, overrides: &[(usize, Cell)]) -> Board {
        let mut board = Board::empty();
        for index in 0..NUM_SQUARES {
            board.put(Position::from_index(index), fill);
        }
        for &(index, cell) in overrides {
            board.put(Position::from_index(index), cell);
        }
        board
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new_with_default_selector();
        let state = game.state();

        assert_eq!(state.current_player, 1);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn search_game_keeps_its_config() {
        let config = SearchConfig::with_depth(3);
        let mut game = Game::with_search(config);

        assert_eq!(game.config(), config);
        assert_eq!(game.best_score(), best_score(&Board::new(), Side::Black, 3));

        game.play(2, 3).unwrap();
        let expected = Searcher::new(config).score(game.board(), Side::White).score;
        assert_eq!(game.best_score(), expected);
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = Game::new_with_default_selector();

        assert!(matches!(
            game.play(0, 0),
            Err(EngineError::InvalidMove { .. })
        ));
        assert!(matches!(
            game.play(3, 3),
            Err(EngineError::InvalidMove { .. })
        ));
        assert_eq!(
            game.play(9, 0),
            Err(EngineError::OutOfBounds { col: 9, row: 0 })
        );
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn legal_play_flips_and_switches_turn() {
        let mut game = Game::new_with_default_selector();

        game.play(2, 3).unwrap();
        let state = game.state();

        assert_eq!(game.current_side(), Side::White);
        assert_eq!(state.black_count, 4);
        assert_eq!(state.white_count, 1);
        assert_eq!(state.flipped, vec![3 * 8 + 3]);
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let mut game = Game::new_with_default_selector();
        let board = filled(Cell::White, &[(0, Cell::Empty), (1, Cell::Black)]);
        game.set_board_for_test(board, Side::Black);

        assert!(!game.has_legal_moves_for_current());
        game.pass().unwrap();

        assert_eq!(game.current_side(), Side::White);
        let state = game.state();
        assert!(state.is_pass);
        assert!(state.flipped.is_empty());
        assert!(!state.is_game_over);
        assert!(game.has_legal_moves_for_current());
    }

    #[test]
    fn pass_is_rejected_when_a_move_exists() {
        let mut game = Game::new_with_default_selector();
        assert_eq!(game.pass(), Err(EngineError::PassNotAllowed));
    }

    #[test]
    fn t04_both_passes_end_game() {
        let mut game = Game::new_with_default_selector();
        let board = filled(Cell::Black, &[(0, Cell::Empty)]);
        game.set_board_for_test(board, Side::Black);

        assert!(!game.has_legal_moves_for_current());
        game.pass().unwrap();

        assert_eq!(game.current_side(), Side::White);
        assert!(game.is_game_over());
        assert_eq!(game.play(0, 0), Err(EngineError::GameOver));
        assert_eq!(game.result().winner, 1);
    }

    #[test]
    fn t05_full_board_after_move_sets_game_over() {
        let mut game = Game::new(Box::new(FixedMoveSelector {
            target: Position { col: 0, row: 0 },
        }));
        let board = filled(Cell::White, &[(0, Cell::Empty), (1, Cell::Black)]);
        game.set_board_for_test(board, Side::White);

        game.do_ai_move().unwrap();
        let state = game.state();

        assert!(state.is_game_over);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![1]);
        assert_eq!(game.result().winner, 2);
    }

    #[test]
    fn ai_move_rejects_illegal_selection() {
        let mut game = Game::new(Box::new(IllegalMoveSelector));

        assert!(matches!(
            game.do_ai_move(),
            Err(EngineError::InvalidMove { .. })
        ));
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn ai_move_without_legal_moves_reports_it() {
        let mut game = Game::new_with_default_selector();
        let board = filled(Cell::White, &[(0, Cell::Empty), (1, Cell::Black)]);
        game.set_board_for_test(board, Side::Black);

        assert_eq!(game.do_ai_move(), Err(EngineError::NoLegalMove));
    }

    #[test]
    fn self_play_keeps_invariants_until_game_over() {
        let mut game = Game::with_search(SearchConfig::with_depth(2));

        while !game.is_game_over() {
            let before = *game.board();
            let side = game.current_side();

            if game.has_legal_moves_for_current() {
                game.do_ai_move().unwrap();
                let after = *game.board();
                let flipped = game.state().flipped.len() as u8;

                assert!(flipped > 0);
                assert_eq!(after.disc_count(side), before.disc_count(side) + flipped + 1);
                assert_eq!(
                    after.disc_count(side.opponent()),
                    before.disc_count(side.opponent()) - flipped
                );
            } else {
                game.pass().unwrap();
            }

            let board = game.board();
            let total = board.count(Cell::Black) as u32
                + board.count(Cell::White) as u32
                + board.count(Cell::Empty) as u32;
            assert_eq!(total, 64);
        }

        let result = game.result();
        assert!(result.black_count + result.white_count <= 64);
    }
}
