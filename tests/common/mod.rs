//! Shared helpers for integration tests.

use dice_race::core::{GameConfig, ScriptedDice};
use dice_race::rules::TurnEngine;

/// Route engine logs to the test writer. Set `RUST_LOG=dice_race=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An engine that will roll exactly `faces`, in order.
pub fn scripted_engine(
    player_count: usize,
    names: &[&str],
    target_score: u32,
    faces: &[u8],
) -> TurnEngine<ScriptedDice> {
    init_tracing();
    let config = GameConfig::new(player_count)
        .with_names(names.iter().copied())
        .with_target_score(target_score);
    let dice = ScriptedDice::new(faces.iter().copied()).expect("valid faces");
    TurnEngine::with_dice(config, dice)
}
