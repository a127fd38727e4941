//! Pure per-tick physics transforms
//!
//! Friction, gravity and board-momentum decay. Each function is a total
//! transform of the player record; none touches the world grid.

use super::fixed::{FX_ONE, Fx, Tuning, fx_div, fx_mul};
use super::state::Player;

/// Velocity after one tick of friction.
///
/// Truncating multiply, not flooring: decay must pull toward zero for
/// both signs, and a floor would push negative velocities away from rest.
#[inline]
pub fn friction(vx: Fx, tuning: &Tuning) -> Fx {
    ((vx as i64 * tuning.friction_factor as i64) / FX_ONE as i64) as Fx
}

/// Walk board momentum toward zero by the per-tick decay amount, halved
/// while the low-friction state holds. The state releases once the
/// magnitude falls under the exit threshold.
pub fn board_decay(p: &mut Player, tuning: &Tuning) {
    let step = if p.flags.low_friction {
        tuning.board_decay / 2
    } else {
        tuning.board_decay
    };

    if p.board_vx.abs() <= step {
        p.board_vx = 0;
    } else if p.board_vx > 0 {
        p.board_vx -= step;
    } else {
        p.board_vx += step;
    }

    if p.flags.low_friction && p.board_vx.abs() < tuning.low_friction_exit {
        p.flags.low_friction = false;
    }
}

/// One tick of gravity, clamped to terminal velocity.
///
/// Modifier precedence: submersion scales gravity by the water factor,
/// otherwise an armed moon launch scales it by the moon factor. The
/// fastball lift then subtracts independently, proportional to
/// `|board_vx| / reference_max_speed`, and the fastball state releases
/// once board speed drops under a quarter of the accelerator force.
pub fn gravity(p: &mut Player, tuning: &Tuning, submerged: bool) {
    if p.flags.fastball && p.board_vx.abs() < tuning.accelerator_force / 4 {
        p.flags.fastball = false;
    }

    if p.vy >= tuning.terminal_velocity {
        p.vy = tuning.terminal_velocity;
        return;
    }

    let mut g = tuning.gravity;
    if submerged {
        g = fx_mul(g, tuning.water_gravity_factor);
    } else if p.flags.low_gravity {
        g = fx_mul(g, tuning.moon_gravity_factor);
    }

    if p.flags.fastball {
        let ratio = fx_div(p.board_vx.abs(), tuning.reference_max_speed).min(FX_ONE);
        g = (g - fx_mul(tuning.gravity, ratio)).max(0);
    }

    p.vy = (p.vy + g).min(tuning.terminal_velocity);
}
