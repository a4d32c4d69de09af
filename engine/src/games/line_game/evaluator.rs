//! Static evaluation for bounded search.
//!
//! Scores come from the runs each stone belongs to along the four line
//! directions plus a small pull towards the center of the board.

use super::board::Board;
use super::types::{DIRECTIONS, Mark, Player, Position};

/// Score per line pattern, keyed by run length and open ends. Must stay
/// strictly decreasing from `five` to `single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternScores {
    pub five: i32,
    pub open_four: i32,
    pub half_four: i32,
    pub open_three: i32,
    pub half_three: i32,
    pub open_two: i32,
    pub half_two: i32,
    pub single: i32,
}

pub const DEFAULT_PATTERN_SCORES: PatternScores = PatternScores {
    five: 100_000,
    open_four: 10_000,
    half_four: 5_000,
    open_three: 2_000,
    half_three: 500,
    open_two: 200,
    half_two: 50,
    single: 10,
};

const CENTER_BONUS_MAX: i32 = 10;

impl PatternScores {
    pub fn is_strictly_ordered(&self) -> bool {
        let ordered = [
            self.five,
            self.open_four,
            self.half_four,
            self.open_three,
            self.half_three,
            self.open_two,
            self.half_two,
            self.single,
        ];
        ordered.windows(2).all(|pair| pair[0] > pair[1]) && self.single > 0
    }

    /// `run` counts the evaluated stone itself.
    fn score(&self, run: usize, open_ends: usize) -> i32 {
        match (run, open_ends) {
            (5.., _) => self.five,
            (4, 2) => self.open_four,
            (4, 1) => self.half_four,
            (3, 2) => self.open_three,
            (3, 1) => self.half_three,
            (2, 2) => self.open_two,
            (2, 1) => self.half_two,
            (1, 1..) => self.single,
            _ => 0,
        }
    }
}

impl Default for PatternScores {
    fn default() -> Self {
        DEFAULT_PATTERN_SCORES
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    scores: PatternScores,
}

impl Evaluator {
    pub fn new(scores: PatternScores) -> Self {
        debug_assert!(scores.is_strictly_ordered());
        Self { scores }
    }

    pub fn scores(&self) -> &PatternScores {
        &self.scores
    }

    /// Sum of the four directional pattern scores of `pos` for `player`.
    /// The cell itself counts as the player's stone whatever it holds.
    pub fn evaluate_position(&self, board: &Board, pos: Position, player: Player) -> i32 {
        let mark = player.mark();
        let mut score = 0;

        for (d_row, d_col) in DIRECTIONS {
            let mut run = 1;
            let mut open_ends = 0;

            for sign in [1, -1] {
                let mut distance = 1;
                while let Some(next) = pos.offset(d_row * sign, d_col * sign, distance, board.size()) {
                    match board.get(next) {
                        Some(cell) if cell == mark => run += 1,
                        Some(Mark::Empty) => {
                            open_ends += 1;
                            break;
                        }
                        _ => break,
                    }
                    distance += 1;
                }
            }

            score += self.scores.score(run, open_ends);
        }

        score
    }

    pub fn center_bonus(&self, board: &Board, pos: Position) -> i32 {
        let center = board.center();
        let distance = pos.row.abs_diff(center.row) + pos.col.abs_diff(center.col);
        (CENTER_BONUS_MAX - distance as i32).max(0)
    }

    pub fn evaluate_board(&self, board: &Board, player: Player) -> i32 {
        board
            .occupied_positions()
            .filter(|&pos| board.get(pos) == Some(player.mark()))
            .map(|pos| self.center_bonus(board, pos) + self.evaluate_position(board, pos, player))
            .sum()
    }

    /// Position value for `maximizer`: its board score minus the opponent's.
    pub fn net_score(&self, board: &Board, maximizer: Player) -> i32 {
        self.evaluate_board(board, maximizer) - self.evaluate_board(board, maximizer.opponent())
    }
}
