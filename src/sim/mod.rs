//! Deterministic simulation module
//!
//! All physics logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (720 ticks per simulated second)
//! - Q20.12 integer arithmetic only; floats never cross into tick math
//! - Single actor, single world writer per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod explosion;
pub mod fixed;
pub mod movement;
pub mod physics;
pub mod state;
pub mod tick;
pub mod world;

pub use fixed::{
    FRAC_BITS, FX_ONE, Fx, PAD_STACK_MAX, Tuning, fx_div, fx_mul, fx_sqrt, tile_index, to_f32,
    to_fx,
};
pub use state::{ModifierFlags, Player, Rect, TickEvent, TileRect};
pub use tick::{TickInput, tick};
pub use world::{Block, BlockProps, CooldownTable, TileMap, WorldGrid};
