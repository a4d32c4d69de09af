//! Minimax search with alpha-beta pruning.
//!
//! The board is mutated in place: every explored move is placed through a
//! `SpeculativeMove` guard and removed when the guard drops, so the caller's
//! board is unchanged once `choose_move` returns, whichever way it returns.

use crate::error::GameError;
use super::board::Board;
use super::evaluator::Evaluator;
use super::settings::SearchSettings;
use super::types::{Player, Position};

/// Score of a won position before the ply adjustment. Larger than any
/// static evaluation.
pub const WIN_SCORE: i32 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Position>,
    /// From the mover's point of view.
    pub score: i32,
    pub nodes: u64,
}

/// Picks the move for `mover`. Candidates are tried in enumeration order and
/// only a strictly better score replaces the current best, so ties go to the
/// first candidate.
pub fn choose_move(
    board: &mut Board,
    mover: Player,
    settings: &SearchSettings,
    evaluator: &Evaluator,
) -> Result<SearchResult, GameError> {
    if board.is_empty() {
        return Ok(SearchResult {
            best_move: Some(board.center()),
            score: 0,
            nodes: 0,
        });
    }

    let mut search = Search {
        evaluator,
        settings,
        maximizer: mover,
        nodes: 0,
    };

    let candidates = board.candidates(settings.candidates);
    let (first, rest) = candidates.split_first().ok_or(GameError::NoLegalMove)?;
    if rest.is_empty() {
        let score = search.leaf_score(board, *first);
        return Ok(SearchResult {
            best_move: Some(*first),
            score,
            nodes: 1,
        });
    }

    let child_depth = settings.max_depth.map(|depth| depth.saturating_sub(1));
    let mut alpha = i32::MIN;
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for &pos in &candidates {
        let score = {
            let mut guard = board.speculate(pos, mover);
            search.minimax(&mut guard, pos, child_depth, 1, false, alpha, i32::MAX)
        };

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
        if settings.pruning {
            alpha = alpha.max(score);
        }
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes: search.nodes,
    })
}

struct Search<'a> {
    evaluator: &'a Evaluator,
    settings: &'a SearchSettings,
    maximizer: Player,
    nodes: u64,
}

impl Search<'_> {
    /// Value of a node whose last move was `last_move`. Wins are scored
    /// `WIN_SCORE - ply` so that a quicker win beats a slower one and a
    /// slower loss beats a quicker one.
    fn minimax(
        &mut self,
        board: &mut Board,
        last_move: Position,
        depth: Option<usize>,
        ply: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(board, last_move, ply) {
            return score;
        }
        if depth == Some(0) {
            return self.evaluator.net_score(board, self.maximizer);
        }

        let candidates = board.candidates(self.settings.candidates);
        if candidates.is_empty() {
            return 0;
        }

        let player = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let child_depth = depth.map(|d| d - 1);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in candidates {
            let score = {
                let mut guard = board.speculate(pos, player);
                self.minimax(&mut guard, pos, child_depth, ply + 1, !maximizing, alpha, beta)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.settings.pruning && beta <= alpha {
                break;
            }
        }

        best
    }

    fn terminal_score(&self, board: &Board, last_move: Position, ply: i32) -> Option<i32> {
        if board.check_win(last_move) {
            let winner = board.get(last_move).and_then(|mark| mark.player());
            return Some(if winner == Some(self.maximizer) {
                WIN_SCORE - ply
            } else {
                -(WIN_SCORE - ply)
            });
        }
        if board.is_full() {
            return Some(0);
        }
        None
    }

    /// Score of playing the only candidate, without looking further ahead.
    fn leaf_score(&self, board: &mut Board, pos: Position) -> i32 {
        let guard = board.speculate(pos, self.maximizer);
        match self.terminal_score(&guard, pos, 1) {
            Some(score) => score,
            None if self.settings.max_depth.is_some() => {
                self.evaluator.net_score(&guard, self.maximizer)
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::line_game::GameSettings;

    fn tic_tac_toe_search() -> SearchSettings {
        GameSettings::tic_tac_toe().search
    }

    fn solve(rows: &[&str], mover: Player) -> SearchResult {
        let mut board = Board::from_rows(rows, 3).unwrap();
        choose_move(&mut board, mover, &tic_tac_toe_search(), &Evaluator::default()).unwrap()
    }

    #[test]
    fn test_empty_board_opens_in_the_center() {
        let evaluator = Evaluator::default();
        let mut large = Board::new(15, 5);
        let mut small = Board::new(3, 3);

        let large_result =
            choose_move(&mut large, Player::O, &GameSettings::gomoku().search, &evaluator).unwrap();
        let small_result = choose_move(&mut small, Player::X, &tic_tac_toe_search(), &evaluator).unwrap();

        assert_eq!(large_result.best_move, Some(Position::new(7, 7)));
        assert_eq!(large_result.nodes, 0);
        assert_eq!(small_result.best_move, Some(Position::new(1, 1)));
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut board = Board::from_rows(&["XOX", "XOO", "OXX"], 3).unwrap();

        let result = choose_move(&mut board, Player::O, &tic_tac_toe_search(), &Evaluator::default());
        assert_eq!(result, Err(GameError::NoLegalMove));
    }

    #[test]
    fn test_single_candidate_is_returned_without_search() {
        let result = solve(&["XOX", "XOO", "OX."], Player::X);

        assert_eq!(result.best_move, Some(Position::new(2, 2)));
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let result = solve(&["XX.", ".O.", "..."], Player::O);

        assert_eq!(result.best_move, Some(Position::new(0, 2)));
        assert!(result.score > -(WIN_SCORE - 10));
    }

    #[test]
    fn test_takes_immediate_win_over_slower_win() {
        // (0, 0) forks and wins two plies later; (2, 0) wins at once.
        let result = solve(&[".XO", "XO.", ".X."], Player::O);

        assert_eq!(result.best_move, Some(Position::new(2, 0)));
        assert_eq!(result.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_forced_loss_keeps_first_candidate() {
        // X threatens (0, 2) and (1, 0); every reply loses on the next ply.
        let result = solve(&["XX.", ".O.", "X.O"], Player::O);

        assert_eq!(result.best_move, Some(Position::new(0, 2)));
        assert_eq!(result.score, -(WIN_SCORE - 2));
    }

    #[test]
    fn test_reply_to_center_is_a_corner_and_draws() {
        let result = solve(&["...", ".X.", "..."], Player::O);

        assert_eq!(result.best_move, Some(Position::new(0, 0)));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let evaluator = Evaluator::default();
        let mut board = Board::from_rows(&["X..", ".O.", "..X"], 3).unwrap();
        let before = board.clone();
        choose_move(&mut board, Player::O, &tic_tac_toe_search(), &evaluator).unwrap();
        assert_eq!(board, before);

        let mut large = Board::new(15, 5);
        for (row, col, player) in [(7, 7, Player::X), (7, 8, Player::O), (8, 8, Player::X)] {
            large.place(Position::new(row, col), player).unwrap();
        }
        let before = large.clone();
        choose_move(&mut large, Player::O, &GameSettings::gomoku().search, &evaluator).unwrap();
        assert_eq!(large, before);
    }

    #[test]
    fn test_search_is_deterministic() {
        let evaluator = Evaluator::default();
        let settings = GameSettings::gomoku().search;
        let mut board = Board::new(15, 5);
        for (row, col, player) in [
            (7, 7, Player::X),
            (6, 8, Player::O),
            (8, 8, Player::X),
            (6, 6, Player::O),
            (9, 9, Player::X),
        ] {
            board.place(Position::new(row, col), player).unwrap();
        }

        let first = choose_move(&mut board, Player::O, &settings, &evaluator).unwrap();
        for _ in 0..3 {
            assert_eq!(choose_move(&mut board, Player::O, &settings, &evaluator).unwrap(), first);
        }
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let evaluator = Evaluator::default();
        let positions: [(&[&str], Player); 4] = [
            (&["...", ".X.", "..."], Player::O),
            (&["X..", "...", "..."], Player::O),
            (&["XO.", ".X.", "..."], Player::O),
            (&["X.O", "...", "X.."], Player::O),
        ];

        for (rows, mover) in positions {
            let pruned = tic_tac_toe_search();
            let plain = SearchSettings { pruning: false, ..pruned };

            let mut board = Board::from_rows(rows, 3).unwrap();
            let with = choose_move(&mut board, mover, &pruned, &evaluator).unwrap();
            let without = choose_move(&mut board, mover, &plain, &evaluator).unwrap();

            assert_eq!(with.best_move, without.best_move, "{:?}", rows);
            assert_eq!(with.score, without.score, "{:?}", rows);
            assert!(with.nodes < without.nodes, "{:?}", rows);
        }
    }

    #[test]
    fn test_pruning_matches_plain_minimax_on_large_board() {
        let evaluator = Evaluator::default();
        let pruned = SearchSettings::bounded(2, 1);
        let plain = SearchSettings { pruning: false, ..pruned };
        let mut board = Board::new(15, 5);
        for (row, col, player) in [
            (7, 7, Player::X),
            (7, 8, Player::O),
            (8, 7, Player::X),
            (6, 7, Player::O),
            (8, 8, Player::X),
        ] {
            board.place(Position::new(row, col), player).unwrap();
        }

        let with = choose_move(&mut board, Player::O, &pruned, &evaluator).unwrap();
        let without = choose_move(&mut board, Player::O, &plain, &evaluator).unwrap();

        assert_eq!(with.best_move, without.best_move);
        assert_eq!(with.score, without.score);
    }

    #[test]
    fn test_full_board_node_is_a_draw() {
        let evaluator = Evaluator::default();
        let settings = tic_tac_toe_search();
        let mut board = Board::from_rows(&["XOX", "XOO", "OXX"], 3).unwrap();
        let mut search = Search {
            evaluator: &evaluator,
            settings: &settings,
            maximizer: Player::O,
            nodes: 0,
        };

        let score = search.minimax(&mut board, Position::new(2, 2), None, 9, true, i32::MIN, i32::MAX);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_depth_limit_falls_back_to_evaluation() {
        let evaluator = Evaluator::default();
        let settings = SearchSettings::bounded(1, 1);
        let mut board = Board::new(15, 5);
        board.place(Position::new(7, 7), Player::X).unwrap();
        let mut search = Search {
            evaluator: &evaluator,
            settings: &settings,
            maximizer: Player::O,
            nodes: 0,
        };

        let score = search.minimax(&mut board, Position::new(7, 7), Some(0), 1, true, i32::MIN, i32::MAX);
        assert_eq!(score, evaluator.net_score(&board, Player::O));
        assert_eq!(search.nodes, 1);
    }
}
