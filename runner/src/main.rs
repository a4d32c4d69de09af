mod match_runner;
mod opponent;
mod runner_config;

use clap::Parser;
use line_games_engine::config::ConfigManager;
use line_games_engine::games::SessionRng;
use line_games_engine::{log, logger};

use match_runner::run_matches;
use runner_config::{OpponentType, RunnerConfig, Variant};

#[derive(Parser)]
#[command(name = "line_games_runner", about = "Plays the line-game engine against a scripted opponent")]
struct Args {
    #[arg(long, default_value = "line_games.yaml")]
    config: String,

    #[arg(long)]
    games: Option<u32>,

    #[arg(long, value_enum)]
    variant: Option<Variant>,

    #[arg(long, value_enum)]
    opponent: Option<OpponentType>,

    /// Seed for the opponent's random choices.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Writes the effective config back to `--config` before playing.
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, RunnerConfig> = ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(opponent) = args.opponent {
        config.opponent = opponent;
    }
    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", args.config);
    }

    let mut rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    log!(
        "Playing {} {:?} games against {:?} opponent (seed {})",
        config.games,
        config.variant,
        config.opponent,
        rng.seed()
    );

    let summary = run_matches(
        config.game_settings().clone(),
        config.games,
        config.opponent,
        &mut rng,
    )?;

    log!(
        "{} games: engine won {}, opponent won {}, drawn {}",
        summary.total(),
        summary.engine_wins,
        summary.opponent_wins,
        summary.draws
    );

    Ok(())
}
