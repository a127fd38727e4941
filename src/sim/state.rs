//! Player state and the float-facing boundary
//!
//! All state that must be persisted for replay/determinism lives here.
//! Positions and velocities are Q20.12 fixed point internally; the only
//! floating point is in the accessors the presentation layer calls, which
//! convert at the boundary and never feed back into tick math.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::explosion;
use super::fixed::{Fx, Tuning, tile_index, to_f32, to_fx};

/// Axis-aligned box in pixels, for the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Inclusive tile-coordinate rectangle covered by the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub tx0: i32,
    pub ty0: i32,
    pub tx1: i32,
    pub ty1: i32,
}

/// Movement modifier flags.
///
/// These are deliberately independent booleans, not a mode enum: a fast
/// horizontal launch can coexist with low gravity and low friction, and
/// each flag decays on its own schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierFlags {
    /// Moon-jump gravity until the next landing
    pub low_gravity: bool,
    /// Horizontal launch that sheds gravity while board speed holds
    pub fastball: bool,
    /// Halved board-velocity decay until speed drops off
    pub low_friction: bool,
}

/// Observable things a tick produced, drained by the caller for
/// inventory, audio and particle hookup. The physics core never calls
/// upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    BlockBroken { tx: i32, ty: i32, block: super::world::Block },
    TntTriggered { tx: i32, ty: i32 },
    Jumped,
    SwimJumped,
    PadLaunched { stack: u32 },
    CeilingBounced { stack: u32 },
    WaterSkipped,
}

/// The single simulated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub x: Fx,
    pub y: Fx,
    /// Input-driven horizontal velocity (px/frame)
    pub vx: Fx,
    /// Vertical velocity, positive down (px/frame)
    pub vy: Fx,
    /// Externally imparted momentum; decays independently of `vx` and
    /// only their sum moves the actor
    pub board_vx: Fx,
    pub width: Fx,
    pub height: Fx,

    pub grounded: bool,
    pub facing_right: bool,
    pub flags: ModifierFlags,

    /// Walk-cycle counter; presentation only
    pub anim_timer: u32,
    /// Consecutive ticks the head has been underwater; presentation only
    pub bubble_timer: u32,

    /// Ticks simulated so far; feeds the cooldown table
    pub ticks: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0,
            y: 0,
            vx: 0,
            vy: 0,
            board_vx: 0,
            width: tuning.player_width,
            height: tuning.player_height,
            grounded: false,
            facing_right: true,
            flags: ModifierFlags::default(),
            anim_timer: 0,
            bubble_timer: 0,
            ticks: 0,
        }
    }

    /// Center of the bounding box in fixed point.
    #[inline]
    pub fn center(&self) -> (Fx, Fx) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    // --- Float boundary -----------------------------------------------

    pub fn position(&self) -> Vec2 {
        Vec2::new(to_f32(self.x), to_f32(self.y))
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.x = to_fx(pos.x);
        self.y = to_fx(pos.y);
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(to_f32(self.vx), to_f32(self.vy))
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vx = to_fx(vel.x);
        self.vy = to_fx(vel.y);
    }

    /// Bounding box in pixels.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: to_f32(self.x),
            y: to_f32(self.y),
            w: to_f32(self.width),
            h: to_f32(self.height),
        }
    }

    /// Tile rectangle the bounding box currently overlaps.
    pub fn grid_rect(&self, tuning: &Tuning) -> TileRect {
        TileRect {
            tx0: tile_index(self.x, tuning.tile_size),
            ty0: tile_index(self.y, tuning.tile_size),
            tx1: tile_index(self.x + self.width - 1, tuning.tile_size),
            ty1: tile_index(self.y + self.height - 1, tuning.tile_size),
        }
    }

    // --- External impulses --------------------------------------------

    /// Accelerator push in the given horizontal direction (sign of `dir`).
    ///
    /// Magnitudes compose like kinetic energy, not linearly:
    /// `new = floor(sqrt(prev^2 + force^2))`, so chaining accelerators has
    /// diminishing returns. Arms the fastball and low-friction states.
    pub fn apply_accelerator_force(&mut self, tuning: &Tuning, dir: i32) {
        if dir == 0 {
            return;
        }
        let prev = self.board_vx as i64;
        let add = tuning.accelerator_force as i64;
        let mag = (prev * prev + add * add).isqrt() as Fx;
        self.board_vx = if dir > 0 { mag } else { -mag };
        self.flags.fastball = true;
        self.flags.low_friction = true;
    }

    /// Knockback from a blast at `(ox, oy)` fixed-point world coordinates.
    /// `strength` scales with clustered explosive count (1.0 = one charge).
    pub fn apply_explosion_impulse(
        &mut self,
        tuning: &Tuning,
        ox: Fx,
        oy: Fx,
        radius_tiles: i32,
        strength: Fx,
    ) {
        let (cx, cy) = self.center();
        if let Some((dvx, dvy)) =
            explosion::blast_impulse(cx, cy, self.vx, self.vy, ox, oy, radius_tiles, strength, tuning)
        {
            self.vx += dvx;
            self.vy += dvy;
            self.grounded = false;
        }
    }
}
