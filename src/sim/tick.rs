//! Fixed timestep simulation tick
//!
//! One tick, one fixed sequence: sample submersion, horizontal intent,
//! water skip, pad launch or jump, board decay, gravity, then integrate
//! and resolve each axis in turn, wrap the toroidal world, and advance
//! the presentation counters. There is no state machine beyond the
//! player's flags; the caller drains the returned events for audio,
//! inventory and particle hookup.

use serde::{Deserialize, Serialize};

use super::collision;
use super::fixed::{Tuning, fx_mul, tile_index};
use super::movement;
use super::physics;
use super::state::{Player, TickEvent};
use super::world::{Block, CooldownTable, WorldGrid};

/// Input snapshot for a single tick (deterministic; no repeat logic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the player by one fixed timestep against the world.
pub fn tick<W: WorldGrid>(
    p: &mut Player,
    world: &mut W,
    cooldowns: &mut CooldownTable,
    tuning: &Tuning,
    input: &TickInput,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    p.ticks += 1;

    // submersion is sampled once, before any velocity work
    let (cx, cy) = p.center();
    let submerged = world
        .block_at(tile_index(cx, tuning.tile_size), tile_index(cy, tuning.tile_size))
        .is_water();

    movement::horizontal_input(p, tuning, input);
    movement::water_skip(p, world, tuning, &mut events);
    if input.jump {
        if !movement::pad_launch(p, world, tuning, cooldowns, &mut events) {
            movement::jump(p, world, tuning, submerged, &mut events);
        }
    }

    physics::board_decay(p, tuning);
    physics::gravity(p, tuning, submerged);

    // integrate and resolve, axis separated
    p.x += fx_mul(p.vx + p.board_vx, tuning.time_scale);
    collision::resolve_horizontal(p, world, tuning);
    p.y += fx_mul(p.vy, tuning.time_scale);
    collision::resolve_vertical(p, world, tuning, &mut events);

    wrap_axes(p, world, tuning);

    // presentation counters
    if p.vx + p.board_vx != 0 {
        p.anim_timer = p.anim_timer.wrapping_add(1);
    }
    let (cx, _) = p.center();
    let head_ty = tile_index(p.y, tuning.tile_size);
    if world.block_at(tile_index(cx, tuning.tile_size), head_ty) == Block::Water {
        p.bubble_timer = p.bubble_timer.wrapping_add(1);
    } else {
        p.bubble_timer = 0;
    }

    events
}

/// Toroidal wrap, per axis, once the position leaves `[-size, span]`.
fn wrap_axes<W: WorldGrid>(p: &mut Player, world: &W, tuning: &Tuning) {
    let span_x = world.width_tiles() * tuning.tile_size;
    if p.x < -p.width || p.x > span_x {
        p.x = p.x.rem_euclid(span_x);
    }
    let span_y = world.height_tiles() * tuning.tile_size;
    if p.y < -p.height || p.y > span_y {
        p.y = p.y.rem_euclid(span_y);
    }
}
