use std::ops::{Deref, DerefMut};

use crate::error::GameError;
use super::settings::CandidateStrategy;
use super::types::{Mark, Player, Position, WinningLine};
use super::win_detector;

/// Square grid of marks plus the run length that wins on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_count: usize,
    cells: Vec<Vec<Mark>>,
    occupied: usize,
}

impl Board {
    pub fn new(size: usize, win_count: usize) -> Self {
        Self {
            size,
            win_count,
            cells: vec![vec![Mark::Empty; size]; size],
            occupied: 0,
        }
    }

    /// Builds a board from text rows: `X`, `O`, and `.` or space for empty.
    pub fn from_rows(rows: &[&str], win_count: usize) -> Result<Self, GameError> {
        let size = rows.len();
        let mut board = Board::new(size, win_count);

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return Err(GameError::InvalidSettings {
                    message: format!("row {} has {} cells, expected {}", row, line.chars().count(), size),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let player = match ch {
                    'X' | 'x' => Player::X,
                    'O' | 'o' => Player::O,
                    '.' | ' ' | '-' => continue,
                    other => {
                        return Err(GameError::InvalidSettings {
                            message: format!("unexpected cell '{}' at {}", other, Position::new(row, col)),
                        });
                    }
                };
                board.place(Position::new(row, col), player)?;
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_count(&self) -> usize {
        self.win_count
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Read-only grid view, row-major, for renderers.
    pub fn rows(&self) -> &[Vec<Mark>] {
        &self.cells
    }

    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.size * self.size
    }

    pub fn is_valid_move(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), GameError> {
        match self.get(pos) {
            None => Err(GameError::InvalidMove {
                position: pos,
                reason: "position out of bounds",
            }),
            Some(Mark::Empty) => {
                self.cells[pos.row][pos.col] = player.mark();
                self.occupied += 1;
                Ok(())
            }
            Some(_) => Err(GameError::InvalidMove {
                position: pos,
                reason: "cell is already marked",
            }),
        }
    }

    /// Clears a cell the caller placed itself. Only search rollback uses this.
    pub fn remove(&mut self, pos: Position) {
        debug_assert!(
            self.get(pos).is_some_and(|mark| !mark.is_empty()),
            "removing empty cell {}",
            pos
        );
        self.cells[pos.row][pos.col] = Mark::Empty;
        self.occupied -= 1;
    }

    /// Places `player` at `pos` until the returned guard is dropped.
    pub(crate) fn speculate(&mut self, pos: Position, player: Player) -> SpeculativeMove<'_> {
        debug_assert!(self.is_valid_move(pos), "speculating on taken cell {}", pos);
        self.cells[pos.row][pos.col] = player.mark();
        self.occupied += 1;
        SpeculativeMove {
            board: self,
            position: pos,
        }
    }

    pub fn check_win(&self, pos: Position) -> bool {
        win_detector::check_win_at(self, pos)
    }

    pub fn winning_line(&self, pos: Position) -> Option<WinningLine> {
        win_detector::winning_line_at(self, pos)
    }

    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(|&pos| self.get(pos).is_some_and(|mark| !mark.is_empty()))
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|&pos| self.is_valid_move(pos)).collect()
    }

    /// Empty cells within `radius` (Chebyshev) of some mark, row-major. An
    /// empty board has only its center as candidate.
    pub fn candidate_moves(&self, radius: usize) -> Vec<Position> {
        if self.is_empty() {
            return vec![self.center()];
        }

        let radius = radius as isize;
        self.positions()
            .filter(|&pos| self.is_valid_move(pos))
            .filter(|&pos| {
                (-radius..=radius).any(|d_row| {
                    (-radius..=radius).any(|d_col| {
                        (d_row, d_col) != (0, 0)
                            && pos
                                .offset(d_row, d_col, 1, self.size)
                                .and_then(|near| self.get(near))
                                .is_some_and(|mark| !mark.is_empty())
                    })
                })
            })
            .collect()
    }

    pub fn candidates(&self, strategy: CandidateStrategy) -> Vec<Position> {
        match strategy {
            CandidateStrategy::AllEmpty => self.empty_cells(),
            CandidateStrategy::Neighborhood { radius } => self.candidate_moves(radius),
        }
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }
}

/// A mark placed during search. Dropping the guard removes it again, so every
/// exit from a search frame, cutoffs included, restores the board.
pub(crate) struct SpeculativeMove<'a> {
    board: &'a mut Board,
    position: Position,
}

impl Deref for SpeculativeMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for SpeculativeMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for SpeculativeMove<'_> {
    fn drop(&mut self) {
        self.board.remove(self.position);
    }
}
