//! Combat resolution: projectile flight and impact, melee swings with
//! deflection, and item pickups.  Functions here run inside the tick in the
//! order [`crate::engine::tick`] dictates and append to its event list.

use crate::entities::{DamageNumber, ItemKind, PlayerClass, Projectile, PLAYER_PROJECTILE_SPEED};
use crate::events::{GameEvent, SoundCue};
use crate::geometry::{overlaps, overlaps_inclusive, quad_bounds};
use crate::session::SessionState;

/// Damage-flash window after a projectile hit.
const HIT_FLASH_MS: u64 = 200;
/// Longer flash and shake after a bomb.
const BOMB_FLASH_MS: u64 = 300;
const BOMB_SHAKE_MS: u64 = 300;
const EXPLOSION_MS: u64 = 500;
/// Short shake whenever the boss takes damage.
const BOSS_HIT_SHAKE_MS: u64 = 100;
const DEFLECTION_MS: u64 = 200;
const SHIELD_MS: u64 = 5_000;

const HEART_HEAL: i32 = 10;
const BOMB_DAMAGE: i32 = 15;

/// Base score for damaging the boss, before the difficulty multiplier.
const BOSS_HIT_SCORE: f32 = 10.0;
/// Base score per deflected projectile.
const DEFLECT_SCORE: f32 = 5.0;

/// The Mage's ranged attack: while the attack input is held and the cooldown
/// is clear, launch a bolt from the player center at the boss center.
pub fn update_ranged_attack(
    state: &mut SessionState,
    attack_held: bool,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    if !attack_held {
        return;
    }
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let Some(player) = state.player.as_mut() else {
        return;
    };
    if player.class != PlayerClass::Mage || !player.can_attack(now_ms) {
        return;
    }
    events.push(GameEvent::Sound(SoundCue::Mage));
    let (px, py) = player.center();
    let (bx, by) = boss.center();
    let dx = bx - px;
    let dy = by - py;
    let len = (dx * dx + dy * dy).sqrt().max(1.0);
    state.projectiles.push(Projectile::player_fired(
        px,
        py,
        dx / len * PLAYER_PROJECTILE_SPEED,
        dy / len * PLAYER_PROJECTILE_SPEED,
        player.attack_power,
    ));
    player.mark_attack(now_ms);
}

/// Advance every projectile one tick, expire strays, and resolve impacts.
/// Enemy projectiles hurt the player unless a shield or dash is up, and are
/// consumed either way; player bolts are consumed by the boss body but only
/// damage it through an open weak point.
pub fn update_projectiles(state: &mut SessionState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.projectiles.len() {
        state.projectiles[i].advance();
        if state.projectiles[i].is_off_arena() {
            state.projectiles.remove(i);
            continue;
        }
        let rect = state.projectiles[i].rect();
        let damage = state.projectiles[i].damage;
        if state.projectiles[i].is_enemy() {
            let shielded = state.shield_active(now_ms);
            if let Some(player) = state.player.as_mut() {
                if overlaps(&rect, &player.rect()) {
                    let immune = player.is_dashing(now_ms) || shielded;
                    if !immune {
                        player.set_health(player.health - damage);
                        state.hit_flash_until = now_ms + HIT_FLASH_MS;
                        events.push(GameEvent::Sound(SoundCue::Damage));
                        events.push(GameEvent::PlayerDamaged { amount: damage });
                    }
                    state.projectiles.remove(i);
                    continue;
                }
            }
        } else if let Some(boss) = state.boss.as_mut() {
            if overlaps(&rect, &boss.rect()) {
                if boss.weak_active {
                    boss.set_health(boss.health - damage);
                    let (bx, by) = boss.center();
                    state
                        .damage_numbers
                        .push(DamageNumber::new(damage, bx, by, now_ms));
                    state.shake_until = now_ms + BOSS_HIT_SHAKE_MS;
                    state.score += (BOSS_HIT_SCORE * state.score_multiplier) as u32;
                    events.push(GameEvent::Sound(SoundCue::BossHit));
                    events.push(GameEvent::BossDamaged { amount: damage });
                }
                state.projectiles.remove(i);
                continue;
            }
        }
        i += 1;
    }
}

/// Melee resolution while the attack input is held.  A ready Warrior or
/// Rogue swing first deflects enemy projectiles out of the weapon arc, then
/// the swing lands on the boss body if the weapon reaches it.  The swing
/// consumes the cooldown even against a closed weak point.
pub fn resolve_melee(
    state: &mut SessionState,
    attack_held: bool,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    if !attack_held {
        return;
    }
    let (weapon, is_melee, swing_ready) = {
        let (Some(player), Some(boss)) = (state.player.as_ref(), state.boss.as_ref()) else {
            return;
        };
        let (xs, ys) = player.weapon_hitbox(boss);
        (
            quad_bounds(&xs, &ys),
            player.class.is_melee(),
            player.can_attack(now_ms),
        )
    };

    // Deflection never consumes the cooldown; the swing can still land.
    if is_melee && swing_ready {
        let mut deflected = false;
        let mut i = 0;
        while i < state.projectiles.len() {
            if state.projectiles[i].is_enemy()
                && overlaps_inclusive(&state.projectiles[i].rect(), &weapon)
            {
                let p = state.projectiles.remove(i);
                state.deflection_until = now_ms + DEFLECTION_MS;
                state.deflection_at = (p.x, p.y);
                state.score += (DEFLECT_SCORE * state.score_multiplier) as u32;
                events.push(GameEvent::ProjectileDeflected { x: p.x, y: p.y });
                deflected = true;
                continue;
            }
            i += 1;
        }
        if deflected {
            events.push(GameEvent::Sound(SoundCue::BossHit));
        }
    }

    let (Some(player), Some(boss)) = (state.player.as_mut(), state.boss.as_mut()) else {
        return;
    };
    if !overlaps_inclusive(&weapon, &boss.rect()) {
        return;
    }
    let health_before = boss.health;
    player.attack(boss, now_ms);
    if is_melee && swing_ready {
        events.push(GameEvent::Sound(SoundCue::Slash));
    }
    let dealt = health_before - boss.health;
    if dealt > 0 {
        let (bx, by) = boss.center();
        state
            .damage_numbers
            .push(DamageNumber::new(dealt, bx, by, now_ms));
        state.shake_until = now_ms + BOSS_HIT_SHAKE_MS;
        state.score += (BOSS_HIT_SCORE * state.score_multiplier) as u32;
        events.push(GameEvent::Sound(SoundCue::BossHit));
        events.push(GameEvent::BossDamaged { amount: dealt });
    }
}

/// Apply and consume every item the player is standing on.
pub fn collect_items(state: &mut SessionState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    let mut i = 0;
    while i < state.items.len() {
        if !overlaps(&state.items[i].rect(), &player.rect()) {
            i += 1;
            continue;
        }
        let item = state.items.remove(i);
        match item.kind {
            ItemKind::Heart => {
                events.push(GameEvent::Sound(SoundCue::PickUped));
                player.set_health(player.health + HEART_HEAL);
            }
            ItemKind::Shield => {
                events.push(GameEvent::Sound(SoundCue::PickUped));
                state.shield_until = now_ms + SHIELD_MS;
            }
            ItemKind::Orb => {
                events.push(GameEvent::Sound(SoundCue::PickUped));
                state.projectiles.retain(|p| !p.is_enemy());
            }
            ItemKind::Bomb => {
                events.push(GameEvent::Sound(SoundCue::Boom));
                state.hit_flash_until = now_ms + BOMB_FLASH_MS;
                state.explosion_until = now_ms + EXPLOSION_MS;
                state.shake_until = now_ms + BOMB_SHAKE_MS;
                state.explosion_at = (item.x, item.y);
                player.set_health(player.health - BOMB_DAMAGE);
            }
        }
        events.push(GameEvent::ItemPickedUp { kind: item.kind });
    }
}
