use line_games_engine::games::SessionRng;
use line_games_engine::{Evaluator, GameError, GameSession, GameSettings, GameStatus, log};

use crate::opponent::calculate_move;
use crate::runner_config::OpponentType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    EngineWon,
    OpponentWon,
    Draw,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub engine_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
}

impl MatchSummary {
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::EngineWon => self.engine_wins += 1,
            MatchOutcome::OpponentWon => self.opponent_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.engine_wins + self.opponent_wins + self.draws
    }
}

pub fn play_game(
    session: &mut GameSession,
    opponent: OpponentType,
    evaluator: &Evaluator,
    rng: &mut SessionRng,
) -> Result<MatchOutcome, GameError> {
    while !session.status().is_over() {
        if session.is_ai_turn() {
            session.request_ai_move()?;
        } else {
            let pos = calculate_move(opponent, session, evaluator, rng)
                .ok_or(GameError::NoLegalMove)?;
            let player = session.human_player();
            session.apply_move(pos, player)?;
            log!("Opponent {} plays {}", player, pos);
        }
    }

    Ok(match session.status() {
        GameStatus::Won(winner) if winner == session.ai_player() => MatchOutcome::EngineWon,
        GameStatus::Won(_) => MatchOutcome::OpponentWon,
        _ => MatchOutcome::Draw,
    })
}

/// Plays `games` games on one session, resetting between them.
pub fn run_matches(
    settings: GameSettings,
    games: u32,
    opponent: OpponentType,
    rng: &mut SessionRng,
) -> Result<MatchSummary, GameError> {
    let evaluator = Evaluator::default();
    let mut session = GameSession::new(settings)?;
    let mut summary = MatchSummary::default();

    for game in 1..=games {
        if game > 1 {
            session.reset();
        }
        let outcome = play_game(&mut session, opponent, &evaluator, rng)?;
        log!(
            "Game {}/{}: engine as {} -> {:?} after {} moves",
            game,
            games,
            session.ai_player(),
            outcome,
            session.history().len()
        );
        summary.record(outcome);
    }

    Ok(summary)
}
