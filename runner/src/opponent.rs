use line_games_engine::games::SessionRng;
use line_games_engine::{Evaluator, GameSession, Position, choose_move};

use crate::runner_config::OpponentType;

/// Move for the side the engine is not playing, or `None` when the board
/// has no empty cell.
pub fn calculate_move(
    opponent: OpponentType,
    session: &GameSession,
    evaluator: &Evaluator,
    rng: &mut SessionRng,
) -> Option<Position> {
    match opponent {
        OpponentType::Random => calculate_random_move(session, rng),
        OpponentType::Minimax => calculate_minimax_move(session, evaluator),
    }
}

fn calculate_random_move(session: &GameSession, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = session.board().empty_cells();
    rng.choose(&available_moves).copied()
}

fn calculate_minimax_move(session: &GameSession, evaluator: &Evaluator) -> Option<Position> {
    let mut board = session.board().clone();
    choose_move(
        &mut board,
        session.human_player(),
        &session.settings().search,
        evaluator,
    )
    .ok()?
    .best_move
}
