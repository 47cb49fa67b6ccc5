//! The combat tick.  One call advances the whole simulation by one frame in
//! a fixed step order, so the same inputs against the same state and clock
//! always produce the same result.
//!
//! Step order per tick: movement and dash, boss weak point and volley, Mage
//! fire, projectile flight and impacts, melee and deflection, win/loss and
//! level transition, item spawn timer, item pickups, transients, shake.

use rand::Rng;

use crate::combat;
use crate::entities::{Boss, BossKind, Particle, ParticleTint, Player};
use crate::events::{GameEvent, SoundCue};
use crate::geometry::circle_overlaps_rect;
use crate::patterns;
use crate::session::{boss_spawn, player_spawn, GameMode, InputFrame, Phase, SessionState};
use crate::spawner;

/// Levels to clear for victory in level mode; also the cycle length of the
/// endless rotation.
pub const FINAL_LEVEL: u32 = 4;

/// Health restored when a level is cleared.
const LEVEL_CLEAR_HEAL: i32 = 20;
/// One tick in this many emits a trail mote per live projectile.
const TRAIL_CHANCE: u32 = 3;
/// Camera shake offset range per axis, in simulation units.
const SHAKE_RANGE: i32 = 5;

/// Advance combat by one tick.  Outside the Combat phase this is a no-op;
/// timers are absolute deadlines, so resuming after a pause needs no
/// adjustment.  Returns the tick's events in the order they happened.
pub fn tick(
    state: &mut SessionState,
    input: &InputFrame,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != Phase::Combat {
        return events;
    }
    update_movement(state, input, now_ms, &mut events);
    update_boss(state, now_ms, rng);
    combat::update_ranged_attack(state, input.attack, now_ms, &mut events);
    combat::update_projectiles(state, now_ms, &mut events);
    combat::resolve_melee(state, input.attack, now_ms, &mut events);
    resolve_outcome(state, now_ms, rng, &mut events);
    update_item_spawns(state, now_ms, rng);
    combat::collect_items(state, now_ms, &mut events);
    update_transients(state, now_ms, rng);
    update_shake(state, now_ms, rng);
    events
}

fn direction(input: &InputFrame) -> (i32, i32) {
    let mut dx = 0;
    let mut dy = 0;
    if input.up {
        dy -= 1;
    }
    if input.down {
        dy += 1;
    }
    if input.left {
        dx -= 1;
    }
    if input.right {
        dx += 1;
    }
    (dx, dy)
}

fn collides_with_boss(player: &Player, boss_body: Option<((f32, f32), f32)>) -> bool {
    match boss_body {
        Some(((cx, cy), radius)) => circle_overlaps_rect(cx, cy, radius, &player.rect()),
        None => false,
    }
}

/// Dash start, dash travel, and held-direction movement.  Any move that
/// would leave the player overlapping the boss body is reverted whole.
fn update_movement(
    state: &mut SessionState,
    input: &InputFrame,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    let boss_body = state.boss.as_ref().map(|b| (b.center(), b.radius()));
    let Some(player) = state.player.as_mut() else {
        return;
    };

    let (dx, dy) = direction(input);

    if input.dash && player.can_dash(now_ms) && (dx != 0 || dy != 0) {
        let len = ((dx * dx + dy * dy) as f32).sqrt();
        player.start_dash(dx as f32 / len, dy as f32 / len, now_ms);
        events.push(GameEvent::Sound(SoundCue::Dash));
    }

    if player.is_dashing(now_ms) {
        let (px, py) = (player.x, player.y);
        player.update_dash(now_ms);
        if collides_with_boss(player, boss_body) {
            player.x = px;
            player.y = py;
        }
    } else if dx != 0 || dy != 0 {
        let (px, py) = (player.x, player.y);
        player.move_by(dx, dy);
        if collides_with_boss(player, boss_body) {
            player.x = px;
            player.y = py;
        }
    }
}

fn update_boss(state: &mut SessionState, now_ms: u64, rng: &mut impl Rng) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.update_weak_point(now_ms);
    if let Some(player) = state.player.as_ref() {
        patterns::run_attack_pattern(boss, player, &mut state.projectiles, now_ms, rng);
    }
}

/// Defeat beats victory when both land on the same tick.  A boss kill pays
/// out, then either ends a level run past the final level or rolls the next
/// boss in: fresh arena (projectiles and items cleared, transients kept),
/// player healed and repositioned, spawn timer rescheduled.
fn resolve_outcome(
    state: &mut SessionState,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let player_dead = state.player.as_ref().map_or(false, |p| p.health <= 0);
    if player_dead {
        state.phase = Phase::Lose;
        events.push(GameEvent::Sound(SoundCue::Lose));
        events.push(GameEvent::Defeat);
        return;
    }

    let boss_dead = state.boss.as_ref().map_or(false, |b| b.health <= 0);
    if !boss_dead {
        return;
    }

    let cleared = state.level;
    state.score += (cleared as f32 * 100.0 * state.score_multiplier) as u32;
    events.push(GameEvent::BossDefeated {
        cleared_level: cleared,
    });
    state.level += 1;

    if state.mode == GameMode::Levels && state.level > FINAL_LEVEL {
        state.phase = Phase::Win;
        events.push(GameEvent::Sound(SoundCue::Won));
        events.push(GameEvent::Victory);
        return;
    }

    events.push(GameEvent::Sound(SoundCue::LevelNext));
    state.projectiles.clear();
    state.items.clear();

    let archetype_level = match state.mode {
        GameMode::Endless => (state.level - 1) % FINAL_LEVEL + 1,
        GameMode::Levels => state.level,
    };
    let (bx, by) = boss_spawn();
    state.boss = Some(Boss::new(
        BossKind::for_level(archetype_level),
        bx,
        by,
        now_ms,
    ));

    if let Some(player) = state.player.as_mut() {
        player.set_health(player.health + LEVEL_CLEAR_HEAL);
        let (sx, sy) = player_spawn(player.width);
        player.x = sx;
        player.y = sy;
    }
    state.next_item_spawn_at = now_ms + spawner::random_spawn_delay_ms(state.level, rng);
    events.push(GameEvent::LevelStarted { level: state.level });
}

fn update_item_spawns(state: &mut SessionState, now_ms: u64, rng: &mut impl Rng) {
    if now_ms < state.next_item_spawn_at {
        return;
    }
    let item = spawner::spawn_item(state.mode, state.difficulty, state.boss.as_ref(), rng);
    state.items.push(item);
    state.next_item_spawn_at = now_ms + spawner::random_spawn_delay_ms(state.level, rng);
}

fn update_transients(state: &mut SessionState, now_ms: u64, rng: &mut impl Rng) {
    for number in &mut state.damage_numbers {
        number.advance();
    }
    state.damage_numbers.retain(|n| !n.is_expired(now_ms));

    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| !p.is_expired(now_ms));

    if rng.gen_range(0..TRAIL_CHANCE) == 0 {
        for projectile in &state.projectiles {
            let tint = if projectile.is_enemy() {
                ParticleTint::EnemyTrail
            } else {
                ParticleTint::PlayerTrail
            };
            let (cx, cy) = projectile.center();
            state.particles.push(Particle::trail(cx, cy, tint, now_ms, rng));
        }
    }
}

fn update_shake(state: &mut SessionState, now_ms: u64, rng: &mut impl Rng) {
    if state.shake_active(now_ms) {
        state.shake_offset = (
            rng.gen_range(-SHAKE_RANGE..=SHAKE_RANGE),
            rng.gen_range(-SHAKE_RANGE..=SHAKE_RANGE),
        );
    } else {
        state.shake_offset = (0, 0);
    }
}
