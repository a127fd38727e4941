//! Terrasim - deterministic physics core for a 2D tile sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-point math, physics, collision,
//!   movement, player state)
//!
//! The simulation advances one actor through a tile grid at a fixed rate,
//! and every arithmetic step runs on Q20.12 fixed-point integers so that
//! replayed inputs reproduce the exact same trajectory on any platform.
//! Floating point exists only at the public boundary (spawn positions,
//! render-facing getters) and in the design constants below, which are
//! baked to fixed point once at startup.

pub mod sim;

pub use sim::fixed::{Fx, Tuning, FX_ONE, to_f32, to_fx};
pub use sim::state::{Player, Rect, TickEvent, TileRect};
pub use sim::tick::{TickInput, tick};
pub use sim::world::{Block, CooldownTable, TileMap, WorldGrid};

/// Game design constants.
///
/// Distances are in pixels, speeds in pixels per 60 Hz display frame.
/// `Tuning::new` converts everything below into Q20.12 fixed point once;
/// nothing here is read again after that.
pub mod consts {
    /// Simulation rate (ticks per simulated second)
    pub const TICK_HZ: u32 = 720;
    /// Display-frame rate the speed constants are expressed against
    pub const FRAME_HZ: u32 = 60;
    /// Fraction of a display frame covered by one tick (60/720)
    pub const TIME_SCALE: f32 = 1.0 / 12.0;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 16.0;
    /// Actor bounding box, fixed relative to tile size
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 28.0;

    /// Gravity (px/frame, gained per frame of falling)
    pub const GRAVITY: f32 = 0.35;
    /// Fall speed ceiling (px/frame)
    pub const TERMINAL_VELOCITY: f32 = 8.0;
    /// Gravity multiplier while the actor's center is submerged
    pub const WATER_GRAVITY_FACTOR: f32 = 0.4;
    /// Gravity multiplier while a moon-jump launch is active
    pub const MOON_GRAVITY_FACTOR: f32 = 0.25;

    /// Ground movement (px/frame)
    pub const WALK_SPEED: f32 = 2.5;
    /// Per-frame velocity retention without directional input.
    /// Per tick this becomes 0.8^(1/12); the literal keeps the conversion
    /// free of libm so identical tables bake on every platform.
    pub const FRICTION_PER_TICK: f32 = 0.981_576_5;

    /// Jump impulse (px/frame)
    pub const JUMP_FORCE: f32 = 7.5;
    /// Swim-jump impulse, weaker than a ground jump (px/frame)
    pub const SWIM_JUMP_FORCE: f32 = 3.0;
    /// Swim jumps only re-fire once vy has decayed above this (px/frame)
    pub const SWIM_JUMP_THRESHOLD: f32 = -1.0;

    /// Board velocity lost per frame (px/frame)
    pub const BOARD_DECAY: f32 = 0.12;
    /// |board velocity| below which the low-friction state ends (px/frame)
    pub const LOW_FRICTION_EXIT: f32 = 0.5;
    /// Speed magnitude added per accelerator push (px/frame)
    pub const ACCELERATOR_FORCE: f32 = 4.0;
    /// Reference top speed for the fastball lift ratio (px/frame)
    pub const REFERENCE_MAX_SPEED: f32 = 12.0;

    /// Minimum horizontal speed to skip off a water surface (px/frame)
    pub const WATER_SKIP_MIN_SPEED: f32 = 6.0;
    /// tan 15 deg: the steepest descent angle that still skips
    pub const WATER_SKIP_TANGENT: f32 = 0.267_949_2;

    /// Upward speed needed to break a natural block from below (px/frame)
    pub const BREAK_VELOCITY: f32 = -5.0;
    /// Downward re-acceleration after breaking a ceiling block (px/frame)
    pub const HEAD_BUMP_REBOUND: f32 = 1.5;

    /// Gap kept between the actor and any resolved tile face (px)
    pub const COLLISION_EPSILON: f32 = 0.01;

    /// Blast energy scale (px^3/frame^2)
    pub const KNOCKBACK_RANGE: f32 = 800.0;
    /// Softening added to the blast distance (px)
    pub const EXPLOSION_DIST_OFFSET: f32 = 8.0;

    /// Ticks before the same jump-pad tile may launch again
    pub const PAD_COOLDOWN_TICKS: u64 = 120;
}
