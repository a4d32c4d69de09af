pub mod config;
pub mod error;
pub mod games;
pub mod logger;

pub use error::GameError;
pub use games::line_game::{
    Board, CandidateStrategy, Evaluator, FirstPlayerMode, GameSession, GameSettings, GameStatus,
    Mark, Player, Position, SearchResult, SearchSettings, WinningLine, choose_move, new_game,
};
