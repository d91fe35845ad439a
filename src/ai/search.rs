use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::EngineError;
use crate::game::MoveSelector;
use crate::moves::{generate_moves, play_unchecked};
use crate::types::{Move, Side};

pub const DEFAULT_DEPTH: u8 = 4;
/// Window sentinels. Symmetric so negating a bound never overflows.
pub const MIN_SCORE: i32 = -i32::MAX;
pub const MAX_SCORE: i32 = i32::MAX;

/// How positions are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchPolicy {
    /// Negamax with alpha-beta pruning over own disc count.
    #[default]
    NegamaxAlphaBeta,
    /// Plain minimax over the number of discs each move captures.
    /// Weaker; kept for compatibility.
    LegacyMinimax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u8,
    pub policy: SearchPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            policy: SearchPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited.
    pub nodes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` for plain scoring requests.
    pub best_move: Option<Move>,
    /// Score from the perspective of the side searched for.
    pub score: i32,
    pub stats: SearchStats,
}

pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Scores `board` for `side` under the configured policy.
    pub fn score(&mut self, board: &Board, side: Side) -> SearchOutcome {
        self.stats = SearchStats::default();

        let score = match self.config.policy {
            SearchPolicy::NegamaxAlphaBeta => {
                self.negaalpha(board, side, self.config.depth, MIN_SCORE, MAX_SCORE)
            }
            SearchPolicy::LegacyMinimax => self.minimax(board, side, side, self.config.depth),
        };

        SearchOutcome {
            best_move: None,
            score,
            stats: self.stats,
        }
    }

    /// Picks the move whose child position scores best for `side`.
    /// Ties keep the earliest move in generator order.
    pub fn best_move(&mut self, board: &Board, side: Side) -> Result<SearchOutcome, EngineError> {
        self.stats = SearchStats::default();

        let moves = generate_moves(board, side);
        if moves.is_empty() {
            return Err(EngineError::NoLegalMove);
        }

        let child_depth = self.config.depth.saturating_sub(1);
        let mut alpha = MIN_SCORE;
        let mut best: Option<(usize, i32)> = None;

        for (i, mv) in moves.iter().enumerate() {
            let score = match self.config.policy {
                SearchPolicy::NegamaxAlphaBeta => {
                    let child = play_unchecked(board, mv, side);
                    -self.negaalpha(&child, side.opponent(), child_depth, -MAX_SCORE, -alpha)
                }
                SearchPolicy::LegacyMinimax => {
                    self.evaluate_move(board, mv, side, side, self.config.depth)
                }
            };

            if best.is_none_or(|(_, top)| score > top) {
                best = Some((i, score));
                alpha = alpha.max(score);
            }
        }

        let (index, score) = best.ok_or(EngineError::NoLegalMove)?;
        Ok(SearchOutcome {
            best_move: moves.into_iter().nth(index),
            score,
            stats: self.stats,
        })
    }

    fn negaalpha(&mut self, board: &Board, side: Side, depth: u8, alpha: i32, beta: i32) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 {
            return board.disc_count(side) as i32;
        }

        // No pass-and-continue: a side without moves is scored as a leaf.
        let moves = generate_moves(board, side);
        if moves.is_empty() {
            return board.disc_count(side) as i32;
        }

        let mut best = MIN_SCORE;
        let mut alpha = alpha;

        for mv in &moves {
            let child = play_unchecked(board, mv, side);
            let score = -self.negaalpha(&child, side.opponent(), depth - 1, -beta, -alpha);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }

        best
    }

    fn minimax(&mut self, board: &Board, perspective: Side, to_move: Side, depth: u8) -> i32 {
        self.stats.nodes += 1;

        let moves = generate_moves(board, to_move);
        if moves.is_empty() {
            return 0;
        }

        let scores = moves
            .iter()
            .map(|mv| self.evaluate_move(board, mv, perspective, to_move, depth))
            .collect::<Vec<_>>();

        let folded = if to_move == perspective {
            scores.into_iter().max()
        } else {
            scores.into_iter().min()
        };
        folded.unwrap_or(0)
    }

    fn evaluate_move(
        &mut self,
        board: &Board,
        mv: &Move,
        perspective: Side,
        to_move: Side,
        depth: u8,
    ) -> i32 {
        if depth == 0 {
            let captured = mv.flip_count() as i32;
            return if to_move == perspective {
                captured
            } else {
                -captured
            };
        }

        let child = play_unchecked(board, mv, to_move);
        self.minimax(&child, perspective, to_move.opponent(), depth - 1)
    }
}

/// Negamax with alpha-beta pruning. The result is from `side`'s perspective.
///
/// Bounds below [`MIN_SCORE`] are clamped to it.
pub fn negamax(board: &Board, depth: u8, alpha: i32, beta: i32, side: Side) -> i32 {
    let mut searcher = Searcher::new(SearchConfig::with_depth(depth));
    searcher.negaalpha(board, side, depth, alpha.max(MIN_SCORE), beta.max(MIN_SCORE))
}

/// Full-window negamax score of `board` for `side`.
pub fn best_score(board: &Board, side: Side, depth: u8) -> i32 {
    negamax(board, depth, MIN_SCORE, MAX_SCORE, side)
}

/// Capture-count minimax. At depth 0 each move of `to_move` scores its
/// capture count, negated when `to_move` is not `perspective`.
pub fn legacy_minimax(board: &Board, perspective: Side, to_move: Side, depth: u8) -> i32 {
    let mut searcher = Searcher::new(SearchConfig {
        depth,
        policy: SearchPolicy::LegacyMinimax,
    });
    searcher.minimax(board, perspective, to_move, depth)
}

/// Selects moves by running a [`Searcher`] with a fixed configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchSelector {
    config: SearchConfig,
}

impl SearchSelector {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl MoveSelector for SearchSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Move> {
        Searcher::new(self.config)
            .best_move(board, side)
            .ok()
            .and_then(|outcome| outcome.best_move)
    }
}
