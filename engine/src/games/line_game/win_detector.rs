//! Win detection.
//!
//! `check_win_at` is the incremental check run after every placed mark, in
//! play and inside the search tree: it only walks the four lines through the
//! last move. `find_winner` rescans the whole grid and is kept for
//! validation of externally built positions.

use super::board::Board;
use super::types::{DIRECTIONS, Mark, Player, Position, WinningLine};

/// Number of consecutive cells holding `mark` when walking from `pos`
/// (exclusive) along `(d_row, d_col)`.
fn count_direction(board: &Board, pos: Position, mark: Mark, d_row: isize, d_col: isize) -> usize {
    let mut count = 0;
    let mut distance = 1;
    while let Some(next) = pos.offset(d_row, d_col, distance, board.size()) {
        if board.get(next) != Some(mark) {
            break;
        }
        count += 1;
        distance += 1;
    }
    count
}

pub fn check_win_at(board: &Board, pos: Position) -> bool {
    winning_line_at(board, pos).is_some()
}

pub fn winning_line_at(board: &Board, pos: Position) -> Option<WinningLine> {
    let player = board.get(pos)?.player()?;
    let mark = player.mark();

    for (d_row, d_col) in DIRECTIONS {
        let forward = count_direction(board, pos, mark, d_row, d_col);
        let backward = count_direction(board, pos, mark, -d_row, -d_col);

        if forward + backward + 1 >= board.win_count() {
            let start = pos.offset(-d_row, -d_col, backward as isize, board.size())?;
            let end = pos.offset(d_row, d_col, forward as isize, board.size())?;
            return Some(WinningLine::new(player, start, end));
        }
    }

    None
}

pub fn find_winner(board: &Board) -> Option<Player> {
    let size = board.size();
    let win_count = board.win_count() as isize;

    for row in 0..size {
        for col in 0..size {
            let start = Position::new(row, col);
            let Some(player) = board.get(start).and_then(Mark::player) else {
                continue;
            };

            for (d_row, d_col) in DIRECTIONS {
                let complete = (0..win_count).all(|i| {
                    start
                        .offset(d_row, d_col, i, size)
                        .and_then(|p| board.get(p))
                        == Some(player.mark())
                });
                if complete {
                    return Some(player);
                }
            }
        }
    }

    None
}
