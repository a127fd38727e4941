//! Input-driven velocity commands
//!
//! Runs before integration, in a fixed priority order: horizontal intent
//! (or friction), the water-skip reflection, then jump pads, then the
//! normal/swim jump. Pads preempt jumps; everything reports through the
//! tick's event list.

use super::fixed::{PAD_STACK_MAX, Tuning, fx_mul, tile_index};
use super::physics;
use super::state::{Player, TickEvent};
use super::tick::TickInput;
use super::world::{Block, CooldownTable, WorldGrid};

/// Left/right intent sets walk speed and facing; no intent (or both keys
/// held) lets friction run.
pub fn horizontal_input(p: &mut Player, tuning: &Tuning, input: &TickInput) {
    if input.left == input.right {
        p.vx = physics::friction(p.vx, tuning);
    } else if input.right {
        p.vx = tuning.walk_speed;
        p.facing_right = true;
    } else {
        p.vx = -tuning.walk_speed;
        p.facing_right = false;
    }
}

/// Mizukiri: a falling actor whose feet are in surface water skips back
/// up instead of sinking, if it is fast and its descent is shallower
/// than 15 degrees.
pub fn water_skip<W: WorldGrid>(
    p: &mut Player,
    world: &W,
    tuning: &Tuning,
    events: &mut Vec<TickEvent>,
) {
    if p.vy <= 0 {
        return;
    }

    let (cx, _) = p.center();
    let tx = tile_index(cx, tuning.tile_size);
    let feet_ty = tile_index(p.y + p.height, tuning.tile_size);
    if world.block_at(tx, feet_ty) != Block::Water {
        return;
    }
    // submerged deeper than the surface cell: no skip, just swimming
    if world.block_at(tx, feet_ty - 1) == Block::Water {
        return;
    }

    let total = (p.vx + p.board_vx).abs();
    if total <= tuning.water_skip_min_speed {
        return;
    }
    if p.vy >= fx_mul(total, tuning.water_skip_tangent) {
        return;
    }

    p.vy = -(tuning.jump_force / 2);
    events.push(TickEvent::WaterSkipped);
}

/// Jump-pad launch off the spring stack under the actor's feet.
///
/// Returns whether a launch fired (which preempts the normal jump).
/// Contiguous TNT under the pad stack converts the launch into a super
/// launch: `tnt_count * 20` replaces the spring count (both clamp to the
/// table), and each charge is reported so the caller can detonate it.
/// A stack resting on cloud arms the moon-gravity launch. The cooldown
/// table debounces the pad tile so a held jump cannot re-fire it.
pub fn pad_launch<W: WorldGrid>(
    p: &mut Player,
    world: &W,
    tuning: &Tuning,
    cooldowns: &mut CooldownTable,
    events: &mut Vec<TickEvent>,
) -> bool {
    if !p.grounded {
        return false;
    }

    let (cx, _) = p.center();
    let tx = tile_index(cx, tuning.tile_size);
    let top_ty = tile_index(p.y + p.height + tuning.epsilon, tuning.tile_size);

    let mut ty = top_ty;
    let mut springs = 0usize;
    while world.block_at(tx, ty) == Block::Spring {
        springs += 1;
        ty += 1;
    }
    if springs == 0 {
        return false;
    }

    if !cooldowns.try_arm((tx, top_ty), p.ticks, tuning.pad_cooldown_ticks) {
        return false;
    }

    // what the pad stack rests on decides the launch flavor
    if world.block_at(tx, ty) == Block::Cloud {
        p.flags.low_gravity = true;
    }

    let tnt_top = ty;
    let mut tnt = 0usize;
    while world.block_at(tx, ty) == Block::Tnt {
        tnt += 1;
        ty += 1;
    }

    let stack = if tnt > 0 {
        (tnt * 20).min(PAD_STACK_MAX)
    } else {
        springs.min(PAD_STACK_MAX)
    };

    p.vy = -tuning.jump_table[stack];
    p.grounded = false;

    for i in 0..tnt {
        events.push(TickEvent::TntTriggered {
            tx,
            ty: tnt_top + i as i32,
        });
    }
    if tnt > 0 {
        log::debug!("super launch off {tnt} tnt charges (stack {stack})");
    }
    events.push(TickEvent::PadLaunched {
        stack: stack as u32,
    });
    true
}

/// Normal or swim jump, when no pad fired this tick.
pub fn jump<W: WorldGrid>(
    p: &mut Player,
    world: &W,
    tuning: &Tuning,
    submerged: bool,
    events: &mut Vec<TickEvent>,
) {
    if p.grounded {
        p.vy = -tuning.jump_force;
        p.grounded = false;
        events.push(TickEvent::Jumped);
        return;
    }

    if submerged && p.vy > tuning.swim_jump_threshold && head_clear(p, world, tuning) {
        p.vy = -tuning.swim_jump_force;
        events.push(TickEvent::SwimJumped);
    }
}

/// Whether the tile row directly above the head is passable across the
/// actor's width.
fn head_clear<W: WorldGrid>(p: &Player, world: &W, tuning: &Tuning) -> bool {
    let ty = tile_index(p.y, tuning.tile_size) - 1;
    let tx0 = tile_index(p.x, tuning.tile_size);
    let tx1 = tile_index(p.x + p.width - 1, tuning.tile_size);
    (tx0..=tx1).all(|tx| !world.block_at(tx, ty).props().solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixed::to_fx;
    use crate::sim::world::TileMap;

    fn setup() -> (Tuning, TileMap, Player) {
        let tuning = Tuning::new();
        let map = TileMap::new(64, 64);
        let p = Player::new(&tuning);
        (tuning, map, p)
    }

    /// Stand the player on top of the tile column at `tx`, surface `ty`.
    fn stand_at(p: &mut Player, t: &Tuning, tx: i32, ty: i32) {
        p.x = tx * t.tile_size + (t.tile_size - t.player_width) / 2;
        p.y = ty * t.tile_size - t.player_height - t.epsilon;
        p.grounded = true;
    }

    #[test]
    fn test_walk_sets_speed_and_facing() {
        let (t, _, mut p) = setup();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        horizontal_input(&mut p, &t, &input);
        assert_eq!(p.vx, t.walk_speed);
        assert!(p.facing_right);

        let input = TickInput {
            left: true,
            ..Default::default()
        };
        horizontal_input(&mut p, &t, &input);
        assert_eq!(p.vx, -t.walk_speed);
        assert!(!p.facing_right);
    }

    #[test]
    fn test_no_intent_applies_friction() {
        let (t, _, mut p) = setup();
        p.vx = to_fx(2.5);
        horizontal_input(&mut p, &t, &TickInput::default());
        assert_eq!(p.vx, physics::friction(to_fx(2.5), &t));

        // both keys held cancel out
        p.vx = to_fx(2.5);
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        horizontal_input(&mut p, &t, &both);
        assert!(p.vx < to_fx(2.5));
    }

    fn surface_pool(map: &mut TileMap, ty: i32) {
        // one-tile-deep pool on a solid bed
        map.fill_rect(0, ty, 63, ty, Block::Water);
        map.fill_rect(0, ty + 1, 63, ty + 1, Block::Stone);
    }

    #[test]
    fn test_water_skip_reflects_shallow_fast_fall() {
        let (t, mut map, mut p) = setup();
        surface_pool(&mut map, 20);

        // feet inside the surface water cell
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0 - 28.0 + 2.0);
        p.vx = to_fx(12.0);
        p.vy = to_fx(3.0);

        let mut events = Vec::new();
        water_skip(&mut p, &map, &t, &mut events);

        // reflected to half the jump impulse, exactly
        assert_eq!(p.vy, -(t.jump_force / 2));
        assert_eq!(events, vec![TickEvent::WaterSkipped]);
    }

    #[test]
    fn test_water_skip_rejects_steep_angle() {
        let (t, mut map, mut p) = setup();
        surface_pool(&mut map, 20);
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0 - 28.0 + 2.0);
        p.vx = to_fx(12.0);
        // steeper than tan 15 deg * 12
        p.vy = to_fx(4.0);

        let mut events = Vec::new();
        water_skip(&mut p, &map, &t, &mut events);
        assert_eq!(p.vy, to_fx(4.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_water_skip_rejects_slow_entry() {
        let (t, mut map, mut p) = setup();
        surface_pool(&mut map, 20);
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0 - 28.0 + 2.0);
        p.vx = to_fx(4.0);
        p.vy = to_fx(0.5);

        let mut events = Vec::new();
        water_skip(&mut p, &map, &t, &mut events);
        assert_eq!(p.vy, to_fx(0.5));
        assert!(events.is_empty());
    }

    #[test]
    fn test_water_skip_rejects_deep_water() {
        let (t, mut map, mut p) = setup();
        // two-deep pool: the cell above the feet is also water
        map.fill_rect(0, 19, 63, 20, Block::Water);
        map.fill_rect(0, 21, 63, 21, Block::Stone);
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0 - 28.0 + 2.0);
        p.vx = to_fx(12.0);
        p.vy = to_fx(3.0);

        let mut events = Vec::new();
        water_skip(&mut p, &map, &t, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_board_velocity_counts_toward_skip_speed() {
        let (t, mut map, mut p) = setup();
        surface_pool(&mut map, 20);
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0 - 28.0 + 2.0);
        p.vx = to_fx(2.0);
        p.board_vx = to_fx(10.0);
        p.vy = to_fx(3.0);

        let mut events = Vec::new();
        water_skip(&mut p, &map, &t, &mut events);
        assert_eq!(events, vec![TickEvent::WaterSkipped]);
    }

    #[test]
    fn test_pad_launch_scales_with_stack_sqrt() {
        for n in 0..=20usize {
            let (t, mut map, mut p) = setup();
            // n springs stacked downward from the standing surface
            for i in 0..n {
                map.set_block(8, 30 + i as i32, Block::Spring);
            }
            map.set_block(8, 30 + n as i32, Block::Stone);
            stand_at(&mut p, &t, 8, 30);

            let mut cooldowns = CooldownTable::new();
            let mut events = Vec::new();
            let fired = pad_launch(&mut p, &map, &t, &mut cooldowns, &mut events);

            if n == 0 {
                assert!(!fired);
                assert_eq!(p.vy, 0);
            } else {
                assert!(fired);
                assert_eq!(p.vy, -t.jump_table[n]);
                assert!(!p.grounded);
                assert!(events.contains(&TickEvent::PadLaunched { stack: n as u32 }));
            }
        }
    }

    #[test]
    fn test_pad_launch_requires_ground_contact() {
        let (t, mut map, mut p) = setup();
        map.set_block(8, 30, Block::Spring);
        stand_at(&mut p, &t, 8, 30);
        p.grounded = false;

        let mut cooldowns = CooldownTable::new();
        assert!(!pad_launch(&mut p, &map, &t, &mut cooldowns, &mut Vec::new()));
    }

    #[test]
    fn test_pad_cooldown_debounces_relaunch() {
        let (t, mut map, mut p) = setup();
        map.set_block(8, 30, Block::Spring);
        stand_at(&mut p, &t, 8, 30);

        let mut cooldowns = CooldownTable::new();
        assert!(pad_launch(&mut p, &map, &t, &mut cooldowns, &mut Vec::new()));

        // land again immediately: same tile refuses until the cooldown runs out
        stand_at(&mut p, &t, 8, 30);
        p.ticks += 1;
        assert!(!pad_launch(&mut p, &map, &t, &mut cooldowns, &mut Vec::new()));

        p.ticks += t.pad_cooldown_ticks;
        assert!(pad_launch(&mut p, &map, &t, &mut cooldowns, &mut Vec::new()));
    }

    #[test]
    fn test_tnt_super_launch_clamps_and_reports_charges() {
        let (t, mut map, mut p) = setup();
        map.set_block(8, 30, Block::Spring);
        // 7 charges -> 140, clamped to the table end
        for i in 0..7 {
            map.set_block(8, 31 + i, Block::Tnt);
        }
        stand_at(&mut p, &t, 8, 30);

        let mut cooldowns = CooldownTable::new();
        let mut events = Vec::new();
        assert!(pad_launch(&mut p, &map, &t, &mut cooldowns, &mut events));

        assert_eq!(p.vy, -t.jump_table[PAD_STACK_MAX]);
        let charges: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, TickEvent::TntTriggered { .. }))
            .collect();
        assert_eq!(charges.len(), 7);
        assert!(events.contains(&TickEvent::TntTriggered { tx: 8, ty: 31 }));
        assert!(events.contains(&TickEvent::TntTriggered { tx: 8, ty: 37 }));
        assert!(events.contains(&TickEvent::PadLaunched {
            stack: PAD_STACK_MAX as u32
        }));
    }

    #[test]
    fn test_tnt_count_replaces_spring_count() {
        let (t, mut map, mut p) = setup();
        map.set_block(8, 30, Block::Spring);
        map.set_block(8, 31, Block::Tnt);
        stand_at(&mut p, &t, 8, 30);

        let mut cooldowns = CooldownTable::new();
        let mut events = Vec::new();
        assert!(pad_launch(&mut p, &map, &t, &mut cooldowns, &mut events));
        // one charge: 20 replaces the single-spring count
        assert_eq!(p.vy, -t.jump_table[20]);
    }

    #[test]
    fn test_cloud_support_arms_low_gravity() {
        let (t, mut map, mut p) = setup();
        map.set_block(8, 30, Block::Spring);
        map.set_block(8, 31, Block::Cloud);
        stand_at(&mut p, &t, 8, 30);

        let mut cooldowns = CooldownTable::new();
        assert!(pad_launch(&mut p, &map, &t, &mut cooldowns, &mut Vec::new()));
        assert!(p.flags.low_gravity);
        assert_eq!(p.vy, -t.jump_table[1]);
    }

    #[test]
    fn test_ground_jump() {
        let (t, map, mut p) = setup();
        stand_at(&mut p, &t, 8, 30);

        let mut events = Vec::new();
        jump(&mut p, &map, &t, false, &mut events);
        assert_eq!(p.vy, -t.jump_force);
        assert!(!p.grounded);
        assert_eq!(events, vec![TickEvent::Jumped]);
    }

    #[test]
    fn test_swim_jump_needs_head_clearance() {
        let (t, mut map, mut p) = setup();
        map.fill_rect(0, 10, 63, 30, Block::Water);

        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0);
        p.vy = to_fx(0.5);

        let mut events = Vec::new();
        jump(&mut p, &map, &t, true, &mut events);
        assert_eq!(p.vy, -t.swim_jump_force);
        assert_eq!(events, vec![TickEvent::SwimJumped]);

        // cap the column directly overhead: no lift
        let mut p2 = Player::new(&t);
        p2.x = to_fx(8.0 * 16.0);
        p2.y = to_fx(20.0 * 16.0);
        p2.vy = to_fx(0.5);
        map.set_block(8, 19, Block::Stone);

        let mut events = Vec::new();
        jump(&mut p2, &map, &t, true, &mut events);
        assert_eq!(p2.vy, to_fx(0.5));
        assert!(events.is_empty());
    }

    #[test]
    fn test_swim_jump_rejected_while_rising_fast() {
        let (t, mut map, mut p) = setup();
        map.fill_rect(0, 10, 63, 30, Block::Water);
        p.x = to_fx(8.0 * 16.0);
        p.y = to_fx(20.0 * 16.0);
        p.vy = -to_fx(3.0);

        let mut events = Vec::new();
        jump(&mut p, &map, &t, true, &mut events);
        assert_eq!(p.vy, -to_fx(3.0));
        assert!(events.is_empty());
    }
}
