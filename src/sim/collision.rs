//! Axis-separated tile collision resolution
//!
//! Each axis integrates and then resolves independently: scan the tiles
//! the bounding box overlaps (row-major), and the first solid tile found
//! resolves the whole pass by snapping the actor to the tile face, offset
//! by a small epsilon. The scan reaches one epsilon past the leading edge
//! so a resting actor re-detects its support every tick; the snap keeps
//! the box itself clear of the tile, which is the no-penetration
//! invariant the tests pin down.
//!
//! Exactly one collision resolves per axis per tick. Tunneling at extreme
//! speeds is accepted; there is no swept test.

use super::fixed::{Fx, PAD_STACK_MAX, Tuning, tile_index};
use super::state::{Player, TickEvent};
use super::world::{Block, WorldGrid};

/// Row-major scan of the tile span covering `[x0, x1] x [y0, y1]`,
/// returning the first solid tile.
fn scan_first_solid<W: WorldGrid>(
    world: &W,
    tuning: &Tuning,
    x0: Fx,
    y0: Fx,
    x1: Fx,
    y1: Fx,
) -> Option<(i32, i32, Block)> {
    let tx0 = tile_index(x0, tuning.tile_size);
    let tx1 = tile_index(x1, tuning.tile_size);
    let ty0 = tile_index(y0, tuning.tile_size);
    let ty1 = tile_index(y1, tuning.tile_size);
    for ty in ty0..=ty1 {
        for tx in tx0..=tx1 {
            let block = world.block_at(tx, ty);
            if block.props().solid {
                return Some((tx, ty, block));
            }
        }
    }
    None
}

/// Resolve the horizontal pass. Driven by the combined `vx + board_vx`;
/// impact zeroes both accumulators.
pub fn resolve_horizontal<W: WorldGrid>(p: &mut Player, world: &W, tuning: &Tuning) {
    let drive = p.vx + p.board_vx;
    if drive == 0 {
        return;
    }

    let (x0, x1) = if drive > 0 {
        (p.x, p.x + p.width + tuning.epsilon)
    } else {
        (p.x - tuning.epsilon, p.x + p.width - 1)
    };

    if let Some((tx, _, _)) = scan_first_solid(world, tuning, x0, p.y, x1, p.y + p.height - 1) {
        if drive > 0 {
            p.x = tx * tuning.tile_size - p.width - tuning.epsilon;
        } else {
            p.x = (tx + 1) * tuning.tile_size + tuning.epsilon;
        }
        p.vx = 0;
        p.board_vx = 0;
    }
}

/// Resolve the vertical pass. Driven by `vy`; a missing collision is what
/// clears `grounded` (walking off a ledge is the absence of support, not
/// the presence of air).
pub fn resolve_vertical<W: WorldGrid>(
    p: &mut Player,
    world: &mut W,
    tuning: &Tuning,
    events: &mut Vec<TickEvent>,
) {
    let (y0, y1) = if p.vy >= 0 {
        (p.y, p.y + p.height + tuning.epsilon)
    } else {
        (p.y - tuning.epsilon, p.y + p.height - 1)
    };

    let hit = scan_first_solid(world, tuning, p.x, y0, p.x + p.width - 1, y1);
    let Some((tx, ty, block)) = hit else {
        p.grounded = false;
        return;
    };

    if p.vy >= 0 {
        // landing: rest on top of the tile
        p.y = ty * tuning.tile_size - p.height - tuning.epsilon;
        p.vy = 0;
        p.grounded = true;
        p.flags.low_gravity = false;
        return;
    }

    // ceiling: tuck under the tile, then decide what it does back
    p.y = (ty + 1) * tuning.tile_size + tuning.epsilon;
    let props = block.props();

    if props.breakable && props.natural && p.vy < tuning.break_velocity {
        // struck hard enough: the block shatters and the rest of the
        // scan is abandoned for this tick
        world.set_block(tx, ty, Block::Air);
        log::debug!("broke {:?} from below at ({tx}, {ty})", block);
        events.push(TickEvent::BlockBroken { tx, ty, block });
        p.vy = tuning.head_bump_rebound;
    } else if block == Block::Spring {
        let stack = count_springs_up(world, tx, ty);
        p.vy = tuning.jump_table[stack.min(PAD_STACK_MAX)];
        events.push(TickEvent::CeilingBounced {
            stack: stack as u32,
        });
    } else {
        p.vy = 0;
    }
}

/// Contiguous spring tiles from `(tx, ty)` upward, inclusive.
fn count_springs_up<W: WorldGrid>(world: &W, tx: i32, ty: i32) -> usize {
    let mut n = 0;
    while world.block_at(tx, ty - n as i32) == Block::Spring {
        n += 1;
    }
    n
}
