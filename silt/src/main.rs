//! Liquid-flow demo for the silt simulation core.
//!
//! Seeds a small pool with an air gap, starts the ticker, and logs the
//! number of blocks each tick changes until Ctrl-C.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use silt_core::bud::{Bud, HandlerRegistry, UpdateKind, UpdateRequest};
use silt_core::config::TickConfig;
use silt_core::tick::Ticker;
use silt_core::world::{Block, BlockAccess, Dimension, DimensionId};
use silt_utils::BlockPos;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "silt.json5";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn load_config() -> Result<TickConfig> {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        log::info!("no {CONFIG_PATH} found, using defaults");
        return Ok(TickConfig::default());
    }
    Ok(TickConfig::load(path)?)
}

/// Two water strips whose air gap floods shut once the simulation runs.
fn seed_pool(dimension: &Arc<dyn BlockAccess>) {
    for y in -2..=2 {
        dimension.set_block(BlockPos::new(1, y, 0), Block::Water, true);
        dimension.set_block(BlockPos::new(3, y, 0), Block::Water, true);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = load_config()?;

    let dimension: Arc<dyn BlockAccess> =
        Arc::new(Dimension::new(DimensionId::new("overworld")));
    seed_pool(&dimension);

    let bud = Arc::new(Bud::new(HandlerRegistry::with_builtin()));
    let ticker = Arc::new(Ticker::new(&config));
    ticker.register(bud.clone());

    // Kick the flood off in the middle of the gap.
    bud.enqueue(UpdateRequest::new(
        Arc::clone(&dimension),
        BlockPos::new(2, 0, 0),
        UpdateKind::Normal,
    ));

    let mut events = ticker.subscribe();
    ticker.start();
    log::info!("ticker running at {} tps, ctrl-c to stop", config.tps);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) if !event.changed_blocks.is_empty() => {
                    log::info!("tick changed {} block(s)", event.changed_blocks.len());
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("fell behind, skipped {skipped} tick event(s)");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    ticker.stop();
    log::info!("stopped");
    Ok(())
}
