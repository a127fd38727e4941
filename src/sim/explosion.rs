//! Blast knockback impulse
//!
//! Converts a blast origin, radius and strength into a velocity delta
//! with an elastic-collision-style formula: project the current velocity
//! onto the blast direction, then solve for the delta that leaves the
//! actor moving outward at `sqrt(v_n^2 + 2 * energy)`, so even an actor
//! rushing into the blast comes out moving away from it.
//!
//! Everything runs as floor-divided i64 math. No shifts: squared
//! distances across a full world exceed what a pre-shifted i32 product
//! can carry.

use super::fixed::{FX_ONE, Fx, Tuning, floor_div};

/// Velocity delta for an actor centered at `(cx, cy)` moving at
/// `(vx, vy)`, from a blast at `(ox, oy)` with the given tile radius and
/// strength multiplier. `None` when the blast cannot reach the actor.
#[allow(clippy::too_many_arguments)]
pub fn blast_impulse(
    cx: Fx,
    cy: Fx,
    vx: Fx,
    vy: Fx,
    ox: Fx,
    oy: Fx,
    radius_tiles: i32,
    strength: Fx,
    tuning: &Tuning,
) -> Option<(Fx, Fx)> {
    let one = FX_ONE as i64;
    let dx = (cx - ox) as i64;
    let dy = (cy - oy) as i64;
    let dist_sq = dx * dx + dy * dy;

    let range = radius_tiles as i64 * tuning.tile_size as i64;
    // A coincident origin has no direction to push along; the actor is
    // left untouched rather than shoved along an arbitrary axis.
    if dist_sq == 0 || dist_sq >= range * range {
        return None;
    }

    // sqrt of a squared fixed value is already fixed; no renormalization
    let dist = dist_sq.isqrt();
    let nx = floor_div(dx * one, dist);
    let ny = floor_div(dy * one, dist);

    // energy falls off with distance, floored at one tile
    let clamped = dist.max(tuning.tile_size as i64);
    let s2 = floor_div(strength as i64 * strength as i64, one);
    let reach = floor_div(s2 * tuning.knockback_range as i64, one);
    let energy = floor_div(reach * one, clamped + tuning.explosion_offset as i64);

    let v_dot_n = floor_div(vx as i64 * nx + vy as i64 * ny, one);
    let disc = (v_dot_n * v_dot_n + 2 * energy * one).max(0);
    let delta_v = -v_dot_n + disc.isqrt();

    Some((
        floor_div(delta_v * nx, one) as Fx,
        floor_div(delta_v * ny, one) as Fx,
    ))
}
