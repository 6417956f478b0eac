//! Engine-vs-engine self-play
//!
//! Usage: `mnk [CONFIG.toml]`. Both sides share the configuration except
//! for the stone they play; O moves first. Set `RUST_LOG=debug` to see
//! threat short-circuits and depth changes.

use std::env;
use std::error::Error;

use log::info;

use mnk::{Engine, EngineConfig, Stone};

fn load_config() -> Result<EngineConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            Ok(EngineConfig::load(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut o = Engine::new(EngineConfig {
        own: Stone::O,
        ..config.clone()
    })?;
    let mut x = Engine::new(EngineConfig {
        own: Stone::X,
        ..config
    })?;
    info!(
        "{}x{} board, {} in a row, {} ms per move",
        o.config().board_size,
        o.config().board_size,
        o.board().win_length(),
        o.config().time_budget_ms
    );

    let mut turn = 0usize;
    loop {
        let (mover, other) = if turn % 2 == 0 { (&mut o, &mut x) } else { (&mut x, &mut o) };
        let stone = mover.config().own;

        let result = mover.choose_move();
        let Some(pos) = result.best_move else {
            info!("board full, draw");
            break;
        };
        mover.apply(pos, stone);
        other.apply(pos, stone);
        info!(
            "move {:>3}: {:?} at {} score {} via {:?} depth {} -> {} in {} ms ({} nodes)",
            turn + 1,
            stone,
            pos,
            result.score,
            result.source,
            result.depth,
            result.next_depth,
            result.time_ms,
            result.stats.nodes
        );

        if mover.board().is_winning_move(pos) {
            info!("{stone:?} wins after {} moves", turn + 1);
            break;
        }
        if mover.is_game_over(pos) {
            info!("board full, draw");
            break;
        }
        turn += 1;
    }

    Ok(())
}
