//! Item spawn director: when the next pickup drops, which kind it is, and
//! where it lands.  Delays shrink as levels climb; kind odds shift with the
//! mode and difficulty; placement avoids the boss's doorstep.

use rand::Rng;

use crate::entities::{Boss, Item, ItemKind, ITEM_SIZE};
use crate::geometry::{ARENA_H, ARENA_W};
use crate::session::{Difficulty, GameMode};

/// Base delay range between item drops at level 1, in ms.  The upper bound
/// is exclusive.
pub const SPAWN_DELAY_MIN_MS: u64 = 10_000;
pub const SPAWN_DELAY_MAX_MS: u64 = 18_000;

const PLACEMENT_MARGIN: i32 = 60;
const MIN_BOSS_DISTANCE: f32 = 100.0;
const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Fraction shaved off the base delay range per level.  Level 4 and beyond
/// drop items at a tenth of the level-1 pace.
pub fn spawn_speedup(level: u32) -> f64 {
    match level {
        1 => 0.0,
        2 => 0.60,
        3 => 0.80,
        _ => 0.90,
    }
}

/// Roll the delay until the next item, uniform over the level-scaled range.
pub fn random_spawn_delay_ms(level: u32, rng: &mut impl Rng) -> u64 {
    let factor = 1.0 - spawn_speedup(level);
    let min = (SPAWN_DELAY_MIN_MS as f64 * factor) as u64;
    let max = (SPAWN_DELAY_MAX_MS as f64 * factor) as u64;
    min + rng.gen_range(0..(max - min).max(1))
}

/// Percentage weights for [Heart, Orb, Shield, Bomb], summing to 100.
pub fn item_weights(mode: GameMode, difficulty: Difficulty) -> [u32; 4] {
    match (mode, difficulty) {
        (GameMode::Endless, Difficulty::Easy) => [40, 20, 30, 10],
        (GameMode::Endless, Difficulty::Nightmare) => [15, 15, 15, 55],
        _ => [25, 25, 25, 25],
    }
}

/// Pick an item kind by the active weight table.
pub fn roll_item_kind(mode: GameMode, difficulty: Difficulty, rng: &mut impl Rng) -> ItemKind {
    const KINDS: [ItemKind; 4] = [ItemKind::Heart, ItemKind::Orb, ItemKind::Shield, ItemKind::Bomb];
    let weights = item_weights(mode, difficulty);
    let roll = rng.gen_range(0..100u32);
    let mut cumulative = 0;
    for (kind, weight) in KINDS.iter().zip(weights) {
        cumulative += weight;
        if roll < cumulative {
            return *kind;
        }
    }
    ItemKind::Bomb
}

fn is_near_boss(x: i32, y: i32, boss: &Boss) -> bool {
    let (bx, by) = boss.center();
    let dx = x as f32 - bx;
    let dy = y as f32 - by;
    (dx * dx + dy * dy).sqrt() < MIN_BOSS_DISTANCE
}

/// Roll a drop position inside the placement margin, resampling up to the
/// attempt cap while the point sits within [`MIN_BOSS_DISTANCE`] of the boss
/// center.  The last sample stands if every retry failed.
pub fn place_item(boss: Option<&Boss>, rng: &mut impl Rng) -> (i32, i32) {
    let span_x = ARENA_W - PLACEMENT_MARGIN * 2 - ITEM_SIZE;
    let span_y = ARENA_H - PLACEMENT_MARGIN * 2 - ITEM_SIZE;
    let mut attempts = 0;
    loop {
        let x = PLACEMENT_MARGIN + rng.gen_range(0..span_x);
        let y = PLACEMENT_MARGIN + rng.gen_range(0..span_y);
        attempts += 1;
        let near = boss.map_or(false, |b| is_near_boss(x, y, b));
        if !near || attempts >= MAX_PLACEMENT_ATTEMPTS {
            return (x, y);
        }
    }
}

/// Roll a complete item drop: position first, then kind.
pub fn spawn_item(
    mode: GameMode,
    difficulty: Difficulty,
    boss: Option<&Boss>,
    rng: &mut impl Rng,
) -> Item {
    let (x, y) = place_item(boss, rng);
    Item::new(roll_item_kind(mode, difficulty, rng), x, y)
}
