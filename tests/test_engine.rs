use dodge_arena::engine;
use dodge_arena::entities::*;
use dodge_arena::events::{GameEvent, SoundCue};
use dodge_arena::session::{
    self, boss_spawn, Difficulty, GameMode, InputFrame, Phase, SessionState,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A combat-phase state with the player at the fixed character-select spawn
/// (380, 500) and a fresh boss whose clocks start at `now_ms`.  The item
/// spawn deadline is pushed far out so drops never land mid-scenario.
fn combat_state(class: PlayerClass, kind: BossKind, now_ms: u64) -> SessionState {
    let mut state = SessionState::new();
    state.phase = Phase::Combat;
    state.player = Some(Player::new(class, 380, 500));
    let (bx, by) = boss_spawn();
    state.boss = Some(Boss::new(kind, bx, by, now_ms));
    state.next_item_spawn_at = now_ms + 1_000_000;
    state
}

fn attack_held() -> InputFrame {
    InputFrame {
        attack: true,
        ..InputFrame::default()
    }
}

// ── Tick gating ───────────────────────────────────────────────────────────────

#[test]
fn tick_is_a_no_op_outside_combat() {
    let mut state = SessionState::new(); // ModeSelect
    let events = engine::tick(&mut state, &InputFrame::default(), 0, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(state.phase, Phase::ModeSelect);
    assert!(state.player.is_none());
}

#[test]
fn pause_freezes_projectiles_in_place() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.projectiles.push(Projectile::straight(100.0, 100.0, 2.0, 0.0, 8));
    let mut rng = seeded_rng();

    assert!(session::toggle_pause(&mut state));
    let events = engine::tick(&mut state, &InputFrame::default(), t + 16, &mut rng);
    assert!(events.is_empty());
    assert_eq!(state.projectiles[0].x, 100.0); // unmoved while paused

    assert!(session::toggle_pause(&mut state));
    engine::tick(&mut state, &InputFrame::default(), t + 32, &mut rng);
    assert_eq!(state.projectiles[0].x, 102.0);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn held_direction_moves_at_class_speed() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    let input = InputFrame {
        right: true,
        down: true,
        ..InputFrame::default()
    };
    let events = engine::tick(&mut state, &input, t, &mut seeded_rng());
    assert!(events.is_empty());
    let player = state.player.as_ref().unwrap();
    assert_eq!((player.x, player.y), (384, 504)); // spawn (380,500) + speed 4
}

#[test]
fn movement_stops_at_the_arena_margin() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    {
        let player = state.player.as_mut().unwrap();
        player.x = 40;
        player.y = 40;
    }
    let input = InputFrame {
        left: true,
        up: true,
        ..InputFrame::default()
    };
    engine::tick(&mut state, &input, t, &mut seeded_rng());
    let player = state.player.as_ref().unwrap();
    assert_eq!((player.x, player.y), (40, 40));
}

#[test]
fn step_into_the_boss_is_reverted_whole() {
    let t = 10_000;
    let input = InputFrame {
        right: true,
        ..InputFrame::default()
    };

    // From x=317 one step right puts the body 39 units from the boss center
    // (radius 40): reverted.
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    {
        let player = state.player.as_mut().unwrap();
        player.x = 317;
        player.y = 280;
    }
    engine::tick(&mut state, &input, t, &mut seeded_rng());
    assert_eq!(state.player.as_ref().unwrap().x, 317);

    // From x=316 the step ends exactly 40 away: strictly outside, allowed.
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    {
        let player = state.player.as_mut().unwrap();
        player.x = 316;
        player.y = 280;
    }
    engine::tick(&mut state, &input, t, &mut seeded_rng());
    assert_eq!(state.player.as_ref().unwrap().x, 320);
}

#[test]
fn dash_covers_ground_and_announces_itself() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Rogue, BossKind::Level1, t);
    let input = InputFrame {
        right: true,
        dash: true,
        ..InputFrame::default()
    };
    let events = engine::tick(&mut state, &input, t, &mut seeded_rng());
    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Dash)]);
    let player = state.player.as_ref().unwrap();
    assert_eq!(player.x, 400); // spawn 380 + dash speed 20
    assert_eq!(player.dash_started_at, Some(t));
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn enemy_projectile_damages_the_player() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    // One advance from (400,496) at vy=4 lands the shot on the player's brow.
    state.projectiles.push(Projectile::straight(400.0, 496.0, 0.0, 4.0, 8));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Damage),
            GameEvent::PlayerDamaged { amount: 8 },
        ]
    );
    assert_eq!(state.player.as_ref().unwrap().health, 112);
    assert!(state.projectiles.is_empty()); // consumed by the hit
    assert!(state.hit_flash_active(t));
}

#[test]
fn shield_blocks_damage_but_still_consumes_the_shot() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.shield_until = t + 1_000;
    state.projectiles.push(Projectile::straight(400.0, 496.0, 0.0, 4.0, 8));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert!(events.is_empty());
    assert_eq!(state.player.as_ref().unwrap().health, 120);
    assert!(state.projectiles.is_empty());

    // A shield that expired exactly now no longer protects.
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.shield_until = t;
    state.projectiles.push(Projectile::straight(400.0, 496.0, 0.0, 4.0, 8));
    engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());
    assert_eq!(state.player.as_ref().unwrap().health, 112);
}

#[test]
fn dashing_through_a_shot_takes_no_damage() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Rogue, BossKind::Level1, t);
    // Sits exactly where the dash will land the player this tick.
    state.projectiles.push(Projectile::straight(400.0, 500.0, 0.0, 0.0, 8));
    let input = InputFrame {
        right: true,
        dash: true,
        ..InputFrame::default()
    };
    let events = engine::tick(&mut state, &input, t, &mut seeded_rng());

    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Dash)]);
    assert_eq!(state.player.as_ref().unwrap().health, 90);
    assert!(state.projectiles.is_empty());
}

#[test]
fn strays_expire_exactly_at_the_off_arena_margin() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.projectiles.push(Projectile::straight(-50.0, 300.0, 0.0, 0.0, 8));
    state.projectiles.push(Projectile::straight(-49.9, 300.0, 0.0, 0.0, 8));
    state.projectiles.push(Projectile::straight(849.9, 300.0, 0.0, 0.0, 8));
    state.projectiles.push(Projectile::straight(850.0, 300.0, 0.0, 0.0, 8));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert!(events.is_empty());
    assert_eq!(state.projectiles.len(), 2); // the two just inside the margin
}

#[test]
fn boss_volley_flows_into_the_projectile_pool() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    engine::tick(&mut state, &InputFrame::default(), t + 900, &mut seeded_rng());

    // The aimed shot launches from the boss center and advances once.
    assert_eq!(state.projectiles.len(), 1);
    let shot = &state.projectiles[0];
    assert_eq!((shot.x, shot.y), (400.0, 303.0));
    assert_eq!(shot.vy, 3.0);
    assert_eq!(shot.damage, 8);
    assert!(shot.is_enemy());
}

#[test]
fn weak_point_opens_on_the_boss_clock() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    engine::tick(&mut state, &InputFrame::default(), t + 2_501, &mut seeded_rng());
    assert!(state.boss.as_ref().unwrap().weak_active); // 2501 > 2500 closed window
}

// ── Melee & deflection ────────────────────────────────────────────────────────

/// Warrior standing just below the boss so the weapon strip reaches the
/// body: player (380,360), weapon bounds (395,310)..(405,380).
fn melee_state(kind: BossKind, now_ms: u64) -> SessionState {
    let mut state = combat_state(PlayerClass::Warrior, kind, now_ms);
    {
        let player = state.player.as_mut().unwrap();
        player.x = 380;
        player.y = 360;
    }
    state
}

#[test]
fn swing_through_open_weak_point_lands() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    state.boss.as_mut().unwrap().weak_active = true;
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Slash),
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::BossDamaged { amount: 20 },
        ]
    );
    assert_eq!(state.boss.as_ref().unwrap().health, 100);
    assert_eq!(state.score, 10);
    assert_eq!(state.damage_numbers.len(), 1);
    assert_eq!(state.damage_numbers[0].amount, 20);
    assert!(state.shake_active(t));
    assert_eq!(state.player.as_ref().unwrap().last_attack_at, Some(t));
}

#[test]
fn swing_against_closed_weak_point_only_burns_the_cooldown() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Slash)]);
    assert_eq!(state.boss.as_ref().unwrap().health, 120);
    assert_eq!(state.score, 0);
    assert!(state.damage_numbers.is_empty());
    assert_eq!(state.player.as_ref().unwrap().last_attack_at, Some(t));

    // Still on cooldown next frame: the held input does nothing more.
    let events = engine::tick(&mut state, &attack_held(), t + 16, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(state.boss.as_ref().unwrap().health, 120);
}

#[test]
fn swing_out_of_reach_touches_nothing() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    // At the spawn point the 70-reach strip ends 110 short of the boss.
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(state.player.as_ref().unwrap().last_attack_at, None);
}

#[test]
fn ready_swing_deflects_shots_out_of_the_arc() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    // Inside the weapon strip, clear of both bodies.
    state.projectiles.push(Projectile::straight(395.0, 320.0, 0.0, 0.0, 8));
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::ProjectileDeflected { x: 395.0, y: 320.0 },
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::Sound(SoundCue::Slash),
        ]
    );
    assert!(state.projectiles.is_empty());
    assert_eq!(state.score, 5);
    assert!(state.deflection_active(t));
    assert_eq!(state.deflection_at, (395.0, 320.0));
    assert_eq!(state.boss.as_ref().unwrap().health, 120); // weak point closed
}

#[test]
fn shot_on_the_body_is_a_hit_not_a_deflection() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    // Overlaps the player and the weapon strip at once; impact wins because
    // flight resolves before the swing.
    state.projectiles.push(Projectile::straight(395.0, 365.0, 0.0, 0.0, 8));
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Damage),
            GameEvent::PlayerDamaged { amount: 8 },
            GameEvent::Sound(SoundCue::Slash),
        ]
    );
    assert_eq!(state.player.as_ref().unwrap().health, 112);
    assert_eq!(state.score, 0);
}

// ── Mage ──────────────────────────────────────────────────────────────────────

#[test]
fn mage_launches_a_bolt_at_the_boss() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Mage, BossKind::Level1, t);
    // Nudge the 34-wide body so its center sits under the boss center and
    // the bolt flies straight up.
    state.player.as_mut().unwrap().x = 383;
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Mage)]);
    assert_eq!(state.projectiles.len(), 1);
    let bolt = &state.projectiles[0];
    assert_eq!(bolt.kind, ProjectileKind::PlayerFired);
    assert!(!bolt.is_enemy());
    assert_eq!(bolt.damage, 12);
    // Launched from the player center (400,517) straight up, advanced once.
    assert_eq!((bolt.vx, bolt.vy), (0.0, -6.0));
    assert_eq!((bolt.x, bolt.y), (400.0, 511.0));
    assert_eq!(state.player.as_ref().unwrap().last_attack_at, Some(t));
}

#[test]
fn bolt_lands_only_through_the_open_weak_point() {
    let t = 10_000;

    let mut state = combat_state(PlayerClass::Mage, BossKind::Level1, t);
    state.boss.as_mut().unwrap().weak_active = true;
    state.projectiles.push(Projectile::player_fired(394.0, 345.0, 0.0, -6.0, 12));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());
    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::BossDamaged { amount: 12 },
        ]
    );
    assert_eq!(state.boss.as_ref().unwrap().health, 108);
    assert_eq!(state.score, 10);
    assert_eq!(state.damage_numbers.len(), 1);
    assert!(state.projectiles.is_empty());

    // Closed: the body soaks the bolt for free.
    let mut state = combat_state(PlayerClass::Mage, BossKind::Level1, t);
    state.projectiles.push(Projectile::player_fired(394.0, 345.0, 0.0, -6.0, 12));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(state.boss.as_ref().unwrap().health, 120);
    assert_eq!(state.score, 0);
    assert!(state.projectiles.is_empty());
}

// ── Outcomes & level flow ─────────────────────────────────────────────────────

#[test]
fn clearing_the_final_level_wins_a_level_run() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level4, t);
    state.level = 4;
    {
        let boss = state.boss.as_mut().unwrap();
        boss.health = 15;
        boss.weak_active = true;
    }
    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Slash),
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::BossDamaged { amount: 15 },
            GameEvent::BossDefeated { cleared_level: 4 },
            GameEvent::Sound(SoundCue::Won),
            GameEvent::Victory,
        ]
    );
    assert_eq!(state.phase, Phase::Win);
    assert_eq!(state.level, 5);
    // 10 for the hit plus 4 * 100 for the clear.
    assert_eq!(state.score, 410);
}

#[test]
fn endless_rolls_the_next_boss_in() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level4, t);
    state.mode = GameMode::Endless;
    state.difficulty = Difficulty::Medium;
    state.score_multiplier = 1.5;
    state.level = 4;
    {
        let boss = state.boss.as_mut().unwrap();
        boss.health = 15;
        boss.weak_active = true;
    }
    state.player.as_mut().unwrap().set_health(50);
    // Leftovers that must not survive the transition.
    state.projectiles.push(Projectile::straight(100.0, 100.0, 0.0, 0.0, 8));
    state.items.push(Item::new(ItemKind::Heart, 600, 100));

    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Slash),
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::BossDamaged { amount: 15 },
            GameEvent::BossDefeated { cleared_level: 4 },
            GameEvent::Sound(SoundCue::LevelNext),
            GameEvent::LevelStarted { level: 5 },
        ]
    );
    assert_eq!(state.phase, Phase::Combat);
    assert_eq!(state.level, 5);
    // 15 for the hit at 1.5x, plus 4 * 100 * 1.5 for the clear.
    assert_eq!(state.score, 615);

    // Archetypes cycle: level 5 wraps back to the first boss.
    let boss = state.boss.as_ref().unwrap();
    assert_eq!(boss.kind, BossKind::Level1);
    assert_eq!(boss.health, 120);
    assert!(!boss.weak_active);

    // Fresh arena, healed and repositioned player, rescheduled drops.
    assert!(state.projectiles.is_empty());
    assert!(state.items.is_empty());
    let player = state.player.as_ref().unwrap();
    assert_eq!(player.health, 70); // 50 + 20 clear heal
    assert_eq!((player.x, player.y), (380, 500));
    // Level 5 drop delay runs at a tenth of the base range; the scaled
    // bounds truncate to 999 and 1799.
    assert!((t + 999..t + 1_799).contains(&state.next_item_spawn_at));
}

#[test]
fn level_change_recenters_the_player_by_width() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Rogue, BossKind::Level1, t);
    {
        let player = state.player.as_mut().unwrap();
        player.x = 380;
        player.y = 360;
        player.set_health(50);
    }
    {
        let boss = state.boss.as_mut().unwrap();
        boss.health = 14;
        boss.weak_active = true;
    }
    engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(state.level, 2);
    // Every class starts at x=380, but the reposition centers the 36-wide
    // body at 382.
    let player = state.player.as_ref().unwrap();
    assert_eq!((player.x, player.y), (382, 500));
    assert_eq!(player.health, 70); // 50 + 20 clear heal
}

#[test]
fn transition_keeps_transients_on_screen() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    state.mode = GameMode::Endless;
    {
        let boss = state.boss.as_mut().unwrap();
        boss.health = 15;
        boss.weak_active = true;
    }
    state.damage_numbers.push(DamageNumber::new(7, 200.0, 200.0, t));

    engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(state.level, 2);
    assert_eq!(state.boss.as_ref().unwrap().kind, BossKind::Level2);
    // Both the pre-existing number and the killing blow's stay visible.
    assert_eq!(state.damage_numbers.len(), 2);
}

#[test]
fn defeat_beats_victory_on_the_same_tick() {
    let t = 10_000;
    let mut state = melee_state(BossKind::Level1, t);
    {
        let boss = state.boss.as_mut().unwrap();
        boss.health = 15;
        boss.weak_active = true;
    }
    state.player.as_mut().unwrap().set_health(5);
    // Kills the player during flight, before the swing fells the boss.
    state.projectiles.push(Projectile::straight(395.0, 365.0, 0.0, 0.0, 8));

    let events = engine::tick(&mut state, &attack_held(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Damage),
            GameEvent::PlayerDamaged { amount: 8 },
            GameEvent::Sound(SoundCue::Slash),
            GameEvent::Sound(SoundCue::BossHit),
            GameEvent::BossDamaged { amount: 15 },
            GameEvent::Sound(SoundCue::Lose),
            GameEvent::Defeat,
        ]
    );
    assert_eq!(state.phase, Phase::Lose);
    assert_eq!(state.player.as_ref().unwrap().health, 0);
    assert_eq!(state.boss.as_ref().unwrap().health, 0);
    assert_eq!(state.level, 1); // no payout, no transition
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[test]
fn item_drops_on_schedule_inside_the_margin() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.player = None; // nobody around to scoop it up this tick
    state.next_item_spawn_at = t;

    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert!(events.is_empty());
    assert_eq!(state.items.len(), 1);
    let item = &state.items[0];
    assert!((60..720).contains(&item.x));
    assert!((60..520).contains(&item.y));
    assert!((t + 10_000..t + 18_000).contains(&state.next_item_spawn_at));
}

#[test]
fn heart_heals_up_to_the_class_cap() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.player.as_mut().unwrap().set_health(50);
    state.items.push(Item::new(ItemKind::Heart, 390, 510));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::PickUped),
            GameEvent::ItemPickedUp {
                kind: ItemKind::Heart
            },
        ]
    );
    assert_eq!(state.player.as_ref().unwrap().health, 60);
    assert!(state.items.is_empty());

    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.player.as_mut().unwrap().set_health(115);
    state.items.push(Item::new(ItemKind::Heart, 390, 510));
    engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());
    assert_eq!(state.player.as_ref().unwrap().health, 120); // capped
}

#[test]
fn shield_pickup_opens_the_immunity_window() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.items.push(Item::new(ItemKind::Shield, 390, 510));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::PickUped),
            GameEvent::ItemPickedUp {
                kind: ItemKind::Shield
            },
        ]
    );
    assert!(state.shield_active(t));
    assert_eq!(state.shield_until, t + 5_000);
}

#[test]
fn orb_sweeps_enemy_shots_and_spares_the_bolt() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.items.push(Item::new(ItemKind::Orb, 390, 510));
    state.projectiles.push(Projectile::straight(700.0, 100.0, 0.0, 0.0, 8));
    state.projectiles.push(Projectile::player_fired(700.0, 200.0, 0.0, 0.0, 12));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::PickUped),
            GameEvent::ItemPickedUp {
                kind: ItemKind::Orb
            },
        ]
    );
    assert_eq!(state.projectiles.len(), 1);
    assert_eq!(state.projectiles[0].kind, ProjectileKind::PlayerFired);
}

#[test]
fn bomb_hurts_and_rattles_the_arena() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.items.push(Item::new(ItemKind::Bomb, 390, 510));
    let events = engine::tick(&mut state, &InputFrame::default(), t, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Sound(SoundCue::Boom),
            GameEvent::ItemPickedUp {
                kind: ItemKind::Bomb
            },
        ]
    );
    assert_eq!(state.player.as_ref().unwrap().health, 105);
    assert!(state.hit_flash_active(t));
    assert!(state.explosion_active(t));
    assert!(state.shake_active(t));
    assert_eq!(state.explosion_at, (390, 510));
    // The shake roll stays within its range.
    assert!(state.shake_offset.0.abs() <= 5 && state.shake_offset.1.abs() <= 5);
}

// ── Transients & shake ────────────────────────────────────────────────────────

#[test]
fn damage_numbers_drift_up_and_age_out() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.damage_numbers.push(DamageNumber::new(7, 400.0, 300.0, t));
    let mut rng = seeded_rng();

    engine::tick(&mut state, &InputFrame::default(), t + 16, &mut rng);
    assert_eq!(state.damage_numbers.len(), 1);
    assert_eq!(state.damage_numbers[0].y, 298.5);

    // Past the 800 ms lifetime the number is swept.
    engine::tick(&mut state, &InputFrame::default(), t + 816, &mut rng);
    assert!(state.damage_numbers.is_empty());
}

#[test]
fn live_projectiles_shed_trail_motes() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.boss = None; // keep the pool down to the one seeded shot
    state.projectiles.push(Projectile::straight(100.0, 100.0, 0.0, 0.0, 8));
    let mut rng = seeded_rng();

    let mut saw_trail = false;
    for frame in 1..=60u64 {
        engine::tick(&mut state, &InputFrame::default(), t + frame * 16, &mut rng);
        if let Some(p) = state.particles.first() {
            assert_eq!(p.tint, ParticleTint::EnemyTrail);
            saw_trail = true;
        }
    }
    // A 1-in-3 roll per tick over 60 ticks all but guarantees a mote.
    assert!(saw_trail);
}

#[test]
fn shake_settles_back_to_zero() {
    let t = 10_000;
    let mut state = combat_state(PlayerClass::Warrior, BossKind::Level1, t);
    state.shake_until = t + 100;
    let mut rng = seeded_rng();

    engine::tick(&mut state, &InputFrame::default(), t + 16, &mut rng);
    assert!(state.shake_offset.0.abs() <= 5 && state.shake_offset.1.abs() <= 5);

    engine::tick(&mut state, &InputFrame::default(), t + 116, &mut rng);
    assert_eq!(state.shake_offset, (0, 0));
}
