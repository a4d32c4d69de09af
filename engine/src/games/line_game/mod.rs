mod board;
mod evaluator;
mod search;
mod session;
mod settings;
mod types;
pub mod win_detector;

pub use board::Board;
pub use evaluator::{Evaluator, PatternScores};
pub use search::{SearchResult, WIN_SCORE, choose_move};
pub use session::{GameSession, new_game};
pub use settings::{CandidateStrategy, FirstPlayerMode, GameSettings, SearchSettings};
pub use types::{GameStatus, Mark, Player, Position, WinningLine};
