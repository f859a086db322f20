//! The liquid flow rule.

use std::sync::Arc;

use crate::world::Block;

use super::{Bud, BudHandler, UpdateRequest};

/// Minimum number of water neighbors for a cell to flood.
const FLOW_THRESHOLD: usize = 2;

/// Spreads water into cells that are surrounded by enough of it.
///
/// A target with at least two water blocks among its four planar neighbors
/// becomes water itself; its air neighbors are then re-queued with a
/// one-tick delay, so a flood advances one ring per tick.
pub struct LiquidSpread;

impl LiquidSpread {
    fn flow(bud: &Bud, request: &UpdateRequest) {
        let dimension = &request.dimension;
        let neighbors = request.pos.plane_adjacent();

        let water_count = neighbors
            .iter()
            .filter(|pos| dimension.get_block(**pos, true) == Some(Block::Water))
            .count();
        if water_count < FLOW_THRESHOLD {
            return;
        }

        dimension.set_block(request.pos, Block::Water, true);

        for pos in neighbors {
            if dimension.get_block(pos, true) != Some(Block::Air) {
                continue;
            }
            bud.enqueue(UpdateRequest::delayed(
                Arc::clone(dimension),
                pos,
                request.kind,
                1,
            ));
        }
    }
}

impl BudHandler for LiquidSpread {
    fn handle(&self, bud: &Bud, request: &UpdateRequest) {
        Self::flow(bud, request);
    }
}
