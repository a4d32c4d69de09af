mod session_rng;

pub mod line_game;

pub use session_rng::SessionRng;
