//! Tile grid interface and block classification
//!
//! The physics core never owns terrain; it consumes any [`WorldGrid`]
//! implementation through block lookups and the occasional mutation
//! (breaking a tile from below). A const property table classifies each
//! block id so collision and movement code can branch on `solid` /
//! `breakable` / `natural` without knowing the block set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Block ids the sandbox knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Block {
    #[default]
    Air,
    Water,
    Dirt,
    Stone,
    Sand,
    Wood,
    Leaves,
    /// Crafted plank - breakable by tools, but not by head-bumping
    Plank,
    /// Crafted brick - same crafted exemption as planks
    Brick,
    /// Jump pad; stacks multiply launch strength
    Spring,
    Tnt,
    /// Pad-support tile that arms a floaty, moon-gravity launch
    Cloud,
    /// Unbreakable world edge; also the sentinel for out-of-range lookups
    Boundary,
}

/// Static classification of a block id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProps {
    pub solid: bool,
    pub transparent: bool,
    pub breakable: bool,
    /// Naturally generated, as opposed to player-crafted. Only natural
    /// blocks break when struck from below.
    pub natural: bool,
}

const fn props(solid: bool, transparent: bool, breakable: bool, natural: bool) -> BlockProps {
    BlockProps {
        solid,
        transparent,
        breakable,
        natural,
    }
}

impl Block {
    pub const fn props(self) -> BlockProps {
        match self {
            Block::Air => props(false, true, false, false),
            Block::Water => props(false, true, false, true),
            Block::Dirt => props(true, false, true, true),
            Block::Stone => props(true, false, true, true),
            Block::Sand => props(true, false, true, true),
            Block::Wood => props(true, false, true, true),
            Block::Leaves => props(true, true, true, true),
            Block::Plank => props(true, false, true, false),
            Block::Brick => props(true, false, true, false),
            Block::Spring => props(true, false, false, false),
            Block::Tnt => props(true, false, false, false),
            Block::Cloud => props(true, true, false, true),
            Block::Boundary => props(true, false, false, false),
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.props().solid
    }

    #[inline]
    pub fn is_water(self) -> bool {
        self == Block::Water
    }
}

/// Lookup/mutation surface the physics core consumes terrain through.
///
/// Implementations must be total: coordinates outside the stored grid
/// return a safe solid sentinel ([`Block::Boundary`]) or wrap toroidally,
/// so collision scans never carry bounds-checking branches.
pub trait WorldGrid {
    fn width_tiles(&self) -> i32;
    fn height_tiles(&self) -> i32;
    fn block_at(&self, tx: i32, ty: i32) -> Block;
    fn set_block(&mut self, tx: i32, ty: i32, block: Block);
}

/// Reference grid: a dense, toroidal tile map.
///
/// Both axes wrap, matching the toroidal position wrap in the tick, so a
/// lookup one tile past the right edge seamlessly reads column zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: i32,
    height: i32,
    blocks: Vec<Block>,
}

impl TileMap {
    /// Air-filled map. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "degenerate tile map");
        Self {
            width,
            height,
            blocks: vec![Block::Air; (width * height) as usize],
        }
    }

    /// Fill an inclusive tile rectangle, clipped by wrapping.
    pub fn fill_rect(&mut self, tx0: i32, ty0: i32, tx1: i32, ty1: i32, block: Block) {
        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                self.set_block(tx, ty, block);
            }
        }
    }

    #[inline]
    fn index(&self, tx: i32, ty: i32) -> usize {
        let tx = tx.rem_euclid(self.width);
        let ty = ty.rem_euclid(self.height);
        (ty * self.width + tx) as usize
    }
}

impl WorldGrid for TileMap {
    fn width_tiles(&self) -> i32 {
        self.width
    }

    fn height_tiles(&self) -> i32 {
        self.height
    }

    fn block_at(&self, tx: i32, ty: i32) -> Block {
        self.blocks[self.index(tx, ty)]
    }

    fn set_block(&mut self, tx: i32, ty: i32, block: Block) {
        let i = self.index(tx, ty);
        self.blocks[i] = block;
    }
}

/// Per-tile debounce timers, keyed by tile coordinate.
///
/// Owned by the session and passed into the tick by reference, so two
/// simulations never share cooldown state and tests can start clean.
#[derive(Debug, Clone, Default)]
pub struct CooldownTable {
    deadlines: HashMap<(i32, i32), u64>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cooldown on `key` if none is running. Returns whether the
    /// caller won the slot.
    pub fn try_arm(&mut self, key: (i32, i32), now: u64, duration: u64) -> bool {
        match self.deadlines.get(&key) {
            Some(&until) if now < until => false,
            _ => {
                self.deadlines.insert(key, now + duration);
                true
            }
        }
    }

    /// Drop entries whose deadline has passed. Callers can run this at
    /// whatever cadence keeps the table small.
    pub fn sweep(&mut self, now: u64) {
        self.deadlines.retain(|_, until| *until > now);
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
