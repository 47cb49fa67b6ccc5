//! Boss attack patterns.  Each archetype fires a characteristic volley from
//! the boss center whenever its fire interval has elapsed; everything else
//! about projectile life happens in [`crate::combat`].

use std::f32::consts::{PI, TAU};

use rand::Rng;

use crate::entities::{Boss, BossKind, Player, Projectile};

/// Angular gap between the second archetype's three zigzag streams.
const FAN_SPREAD_L2: f32 = 0.2;
/// Angular gap between the fourth archetype's five zigzag streams.
const FAN_SPREAD_L4: f32 = 0.15;
/// How far the spiral fan rotates between volleys.
const SPIRAL_ADVANCE: f32 = 0.3;
const SPIRAL_ARMS: u32 = 5;

/// Fire the boss's volley if its interval has elapsed, resetting the shot
/// timer.  No-op while the interval is still running.
pub fn run_attack_pattern(
    boss: &mut Boss,
    player: &Player,
    projectiles: &mut Vec<Projectile>,
    now_ms: u64,
    rng: &mut impl Rng,
) {
    if now_ms - boss.last_shot_at < boss.kind.fire_interval_ms() {
        return;
    }
    boss.last_shot_at = now_ms;
    match boss.kind {
        BossKind::Level1 => fire_aimed_shot(boss, player, projectiles),
        BossKind::Level2 => fire_zigzag_fan(boss, player, projectiles),
        BossKind::Level3 => fire_spiral_barrage(boss, player, projectiles),
        BossKind::Level4 => fire_chaos_volley(boss, player, projectiles, rng),
    }
}

/// Unit vector from the boss center toward the player center.  Degenerate
/// zero distance is clamped so the volley still launches.
fn aim(boss: &Boss, player: &Player) -> (f32, f32) {
    let (bx, by) = boss.center();
    let (px, py) = player.center();
    let dx = px - bx;
    let dy = py - by;
    let len = (dx * dx + dy * dy).sqrt().max(1.0);
    (dx / len, dy / len)
}

/// Aim angle in radians from the boss center to the player center.
fn aim_angle(boss: &Boss, player: &Player) -> f32 {
    let (bx, by) = boss.center();
    let (px, py) = player.center();
    (py - by).atan2(px - bx)
}

/// Level 1: a single aimed shot.
fn fire_aimed_shot(boss: &Boss, player: &Player, projectiles: &mut Vec<Projectile>) {
    let (bx, by) = boss.center();
    let (ux, uy) = aim(boss, player);
    let speed = boss.kind.projectile_speed();
    projectiles.push(Projectile::straight(bx, by, ux * speed, uy * speed, 8));
}

/// Level 2: three zigzag streams fanned around the aim line.
fn fire_zigzag_fan(boss: &Boss, player: &Player, projectiles: &mut Vec<Projectile>) {
    let (bx, by) = boss.center();
    let base = aim_angle(boss, player);
    let speed = boss.kind.projectile_speed();
    for i in -1..=1 {
        let angle = base + i as f32 * FAN_SPREAD_L2;
        projectiles.push(Projectile::zigzag(
            bx,
            by,
            angle.cos() * speed,
            angle.sin() * speed,
            9,
        ));
    }
}

/// Level 3: five evenly spaced spiral arms that rotate a little further
/// every volley, plus an aimed three-shot fan 15 degrees apart.
fn fire_spiral_barrage(boss: &mut Boss, player: &Player, projectiles: &mut Vec<Projectile>) {
    let (bx, by) = boss.center();
    for i in 0..SPIRAL_ARMS {
        let angle = boss.spiral_angle + i as f32 * (TAU / SPIRAL_ARMS as f32);
        projectiles.push(Projectile::spiral(bx, by, angle, 10));
    }
    boss.spiral_angle += SPIRAL_ADVANCE;

    let base = aim_angle(boss, player);
    let speed = boss.kind.projectile_speed();
    for i in -1..=1 {
        let angle = base + i as f32 * (PI / 180.0 * 15.0);
        projectiles.push(Projectile::straight(
            bx,
            by,
            angle.cos() * speed,
            angle.sin() * speed,
            10,
        ));
    }
}

/// Level 4 rolls one of three shapes per volley: a hard aimed shot, a wide
/// five-stream zigzag fan, or three spirals at random angles.
fn fire_chaos_volley(
    boss: &Boss,
    player: &Player,
    projectiles: &mut Vec<Projectile>,
    rng: &mut impl Rng,
) {
    let (bx, by) = boss.center();
    let speed = boss.kind.projectile_speed();
    match rng.gen_range(0..3) {
        0 => {
            let (ux, uy) = aim(boss, player);
            projectiles.push(Projectile::straight(bx, by, ux * speed, uy * speed, 11));
        }
        1 => {
            let base = aim_angle(boss, player);
            for i in -2..=2 {
                let angle = base + i as f32 * FAN_SPREAD_L4;
                projectiles.push(Projectile::zigzag(
                    bx,
                    by,
                    angle.cos() * speed,
                    angle.sin() * speed,
                    12,
                ));
            }
        }
        _ => {
            for _ in 0..3 {
                let angle = rng.gen_range(0.0..TAU);
                projectiles.push(Projectile::spiral(bx, by, angle, 12));
            }
        }
    }
}
