//! Game entity types: the player classes, boss archetypes, projectiles,
//! pickups, and short-lived visual transients.  Structs carry their own
//! intrinsic behavior (stat tables, clamped setters, self-motion); anything
//! that crosses entity boundaries lives in the logic modules.

use rand::Rng;

use crate::geometry::{Rect, ARENA_H, ARENA_MARGIN, ARENA_W, OFF_ARENA_MARGIN};

/// How long a dash lasts once started, for every class that has one.
pub const DASH_DURATION_MS: u64 = 150;

/// Width of the weapon hitbox, perpendicular to the swing direction.
pub const WEAPON_THICKNESS: f32 = 10.0;

/// Speed of the Mage's ranged bolt.
pub const PLAYER_PROJECTILE_SPEED: f32 = 6.0;

pub const BOSS_SIZE: i32 = 80;
pub const ITEM_SIZE: i32 = 20;

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerClass {
    Warrior,
    Rogue,
    Mage,
}

impl PlayerClass {
    /// Body size as (width, height).
    pub fn size(&self) -> (i32, i32) {
        match self {
            PlayerClass::Warrior => (40, 40),
            PlayerClass::Rogue => (36, 36),
            PlayerClass::Mage => (34, 34),
        }
    }

    /// Units moved per tick per pressed axis.
    pub fn speed(&self) -> i32 {
        match self {
            PlayerClass::Warrior => 4,
            PlayerClass::Rogue => 7,
            PlayerClass::Mage => 5,
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            PlayerClass::Warrior => 120,
            PlayerClass::Rogue => 90,
            PlayerClass::Mage => 80,
        }
    }

    pub fn attack_power(&self) -> i32 {
        match self {
            PlayerClass::Warrior => 20,
            PlayerClass::Rogue => 14,
            PlayerClass::Mage => 12,
        }
    }

    /// Minimum time between attacks.
    pub fn attack_cooldown_ms(&self) -> u64 {
        match self {
            PlayerClass::Warrior => 600,
            PlayerClass::Rogue => 250,
            PlayerClass::Mage => 400,
        }
    }

    /// How long the swing animation (and the deflection-capable arc) lasts.
    pub fn swing_duration_ms(&self) -> u64 {
        match self {
            PlayerClass::Warrior => 500,
            PlayerClass::Rogue => 200,
            PlayerClass::Mage => 350,
        }
    }

    /// Reach of the weapon hitbox from the body center.
    pub fn weapon_reach(&self) -> f32 {
        match self {
            PlayerClass::Warrior => 70.0,
            PlayerClass::Rogue => 50.0,
            PlayerClass::Mage => 80.0,
        }
    }

    /// Warrior and Rogue fight in melee; their swings damage the boss and
    /// deflect projectiles.  The Mage's swing is marker-only.
    pub fn is_melee(&self) -> bool {
        matches!(self, PlayerClass::Warrior | PlayerClass::Rogue)
    }

    pub fn has_dash(&self) -> bool {
        self.is_melee()
    }

    pub fn dash_cooldown_ms(&self) -> u64 {
        match self {
            PlayerClass::Rogue => 1000,
            _ => 1500,
        }
    }

    /// Units moved per tick while dashing.
    pub fn dash_speed(&self) -> i32 {
        match self {
            PlayerClass::Rogue => 20,
            _ => 15,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub class: PlayerClass,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
    /// When the last attack landed its cooldown, if any attack happened yet.
    pub last_attack_at: Option<u64>,
    pub swing_started_at: Option<u64>,
    pub last_dash_at: Option<u64>,
    pub dash_started_at: Option<u64>,
    /// Normalized dash direction, meaningful only while a dash is running.
    pub dash_dir: (f32, f32),
}

impl Player {
    pub fn new(class: PlayerClass, x: i32, y: i32) -> Self {
        let (width, height) = class.size();
        Player {
            class,
            x,
            y,
            width,
            height,
            speed: class.speed(),
            health: class.max_health(),
            max_health: class.max_health(),
            attack_power: class.attack_power(),
            last_attack_at: None,
            swing_started_at: None,
            last_dash_at: None,
            dash_started_at: None,
            dash_dir: (0.0, 0.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Clamped to [0, max_health].
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Move by one input step per axis (`dx`/`dy` in −1..=1), scaled by class
    /// speed and clamped to the arena margin.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = (self.x + dx * self.speed).clamp(ARENA_MARGIN, ARENA_W - ARENA_MARGIN - self.width);
        self.y = (self.y + dy * self.speed).clamp(ARENA_MARGIN, ARENA_H - ARENA_MARGIN - self.height);
    }

    pub fn can_attack(&self, now_ms: u64) -> bool {
        match self.last_attack_at {
            None => true,
            Some(t) => now_ms - t >= self.class.attack_cooldown_ms(),
        }
    }

    /// Consume the attack cooldown and start the swing animation window.
    pub fn mark_attack(&mut self, now_ms: u64) {
        self.last_attack_at = Some(now_ms);
        self.swing_started_at = Some(now_ms);
    }

    pub fn is_swinging(&self, now_ms: u64) -> bool {
        match self.swing_started_at {
            None => false,
            Some(t) => now_ms - t < self.class.swing_duration_ms(),
        }
    }

    /// Melee swing against the boss.  Consumes the cooldown whenever it is
    /// ready; health only comes off while the weak point is open, and never
    /// from a Mage swing.
    pub fn attack(&mut self, boss: &mut Boss, now_ms: u64) {
        if !self.can_attack(now_ms) {
            return;
        }
        self.mark_attack(now_ms);
        if self.class.is_melee() && boss.weak_active {
            boss.set_health(boss.health - self.attack_power);
        }
    }

    pub fn can_dash(&self, now_ms: u64) -> bool {
        if !self.class.has_dash() || self.is_dashing(now_ms) {
            return false;
        }
        match self.last_dash_at {
            None => true,
            Some(t) => now_ms - t >= self.class.dash_cooldown_ms(),
        }
    }

    /// Begin a dash along `(dir_x, dir_y)`.  The caller normalizes the
    /// direction and must not pass a zero vector.
    pub fn start_dash(&mut self, dir_x: f32, dir_y: f32, now_ms: u64) {
        debug_assert!(
            dir_x != 0.0 || dir_y != 0.0,
            "dash direction must be non-zero"
        );
        self.dash_dir = (dir_x, dir_y);
        self.dash_started_at = Some(now_ms);
        self.last_dash_at = Some(now_ms);
    }

    pub fn is_dashing(&self, now_ms: u64) -> bool {
        match self.dash_started_at {
            None => false,
            Some(t) => now_ms - t < DASH_DURATION_MS,
        }
    }

    /// One tick of dash travel, clamped like normal movement.  Fractional
    /// steps truncate toward zero.
    pub fn update_dash(&mut self, now_ms: u64) {
        if !self.is_dashing(now_ms) {
            return;
        }
        let step = self.class.dash_speed() as f32;
        self.x = (self.x + (self.dash_dir.0 * step) as i32)
            .clamp(ARENA_MARGIN, ARENA_W - ARENA_MARGIN - self.width);
        self.y = (self.y + (self.dash_dir.1 * step) as i32)
            .clamp(ARENA_MARGIN, ARENA_H - ARENA_MARGIN - self.height);
    }

    /// Corners of the weapon quad, aimed from the player center at the boss
    /// center: a `reach`-long, `WEAPON_THICKNESS`-wide strip.  Returned as
    /// parallel x/y corner arrays.
    pub fn weapon_hitbox(&self, boss: &Boss) -> ([f32; 4], [f32; 4]) {
        let (cx, cy) = self.center();
        let (bx, by) = boss.center();
        let dx = bx - cx;
        let dy = by - cy;
        let len = (dx * dx + dy * dy).sqrt().max(1.0);
        let ux = dx / len;
        let uy = dy / len;
        let reach = self.class.weapon_reach();
        let ex = cx + ux * reach;
        let ey = cy + uy * reach;
        let half = WEAPON_THICKNESS / 2.0;
        let hx = -uy * half;
        let hy = ux * half;
        (
            [cx + hx, cx - hx, ex - hx, ex + hx],
            [cy + hy, cy - hy, ey - hy, ey + hy],
        )
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    Level1,
    Level2,
    Level3,
    Level4,
}

impl BossKind {
    /// Archetype fought at a 1-based level.  Levels past four reuse the
    /// final archetype; endless mode cycles before calling this.
    pub fn for_level(level: u32) -> Self {
        match level {
            1 => BossKind::Level1,
            2 => BossKind::Level2,
            3 => BossKind::Level3,
            _ => BossKind::Level4,
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            BossKind::Level1 => 120,
            BossKind::Level2 => 160,
            BossKind::Level3 => 200,
            BossKind::Level4 => 260,
        }
    }

    /// Launch speed of this archetype's projectiles.
    pub fn projectile_speed(&self) -> f32 {
        match self {
            BossKind::Level4 => 4.0,
            _ => 3.0,
        }
    }

    pub fn fire_interval_ms(&self) -> u64 {
        match self {
            BossKind::Level1 => 900,
            BossKind::Level2 => 750,
            BossKind::Level3 => 550,
            BossKind::Level4 => 380,
        }
    }

    /// How long the weak point stays open once it opens.
    pub fn weak_open_ms(&self) -> u64 {
        match self {
            BossKind::Level1 => 1500,
            BossKind::Level2 => 1200,
            BossKind::Level3 => 1000,
            BossKind::Level4 => 800,
        }
    }

    /// How long the weak point stays closed between openings.
    pub fn weak_closed_ms(&self) -> u64 {
        match self {
            BossKind::Level1 => 2500,
            BossKind::Level2 => 2200,
            BossKind::Level3 => 2000,
            BossKind::Level4 => 1800,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub health: i32,
    pub max_health: i32,
    /// Whether the weak point is currently open.  Starts closed.
    pub weak_active: bool,
    pub last_weak_toggle_at: u64,
    pub last_shot_at: u64,
    /// Base angle the next spiral volley fans out from (third archetype).
    pub spiral_angle: f32,
}

impl Boss {
    pub fn new(kind: BossKind, x: i32, y: i32, now_ms: u64) -> Self {
        Boss {
            kind,
            x,
            y,
            size: BOSS_SIZE,
            health: kind.max_health(),
            max_health: kind.max_health(),
            weak_active: false,
            last_weak_toggle_at: now_ms,
            last_shot_at: now_ms,
            spiral_angle: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.size as f32,
            self.size as f32,
        )
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.size as f32 / 2.0,
            self.y as f32 + self.size as f32 / 2.0,
        )
    }

    /// Body radius for the player-vs-boss circle check.
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Clamped to [0, max_health].
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Flip the weak point once its current window has strictly elapsed.
    /// At most one flip per call; the toggle timestamp resets on flip.
    pub fn update_weak_point(&mut self, now_ms: u64) {
        let elapsed = now_ms - self.last_weak_toggle_at;
        if self.weak_active {
            if elapsed > self.kind.weak_open_ms() {
                self.weak_active = false;
                self.last_weak_toggle_at = now_ms;
            }
        } else if elapsed > self.kind.weak_closed_ms() {
            self.weak_active = true;
            self.last_weak_toggle_at = now_ms;
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

const ENEMY_PROJECTILE_SIZE: f32 = 12.0;
const PLAYER_PROJECTILE_SIZE: f32 = 10.0;

const ZIGZAG_FREQ: f32 = 0.2;
const ZIGZAG_AMP: f32 = 3.0;

const SPIRAL_ANGLE_STEP: f32 = 0.08;
const SPIRAL_RADIUS_STEP: f32 = 2.0;
const SPIRAL_MIN_RADIUS: f32 = 30.0;
const SPIRAL_MAX_RADIUS: f32 = 150.0;

/// Motion law and per-variant kinematic state.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectileKind {
    /// Constant velocity.
    Straight,
    /// Constant velocity plus a sine wobble on the x axis.
    ZigZag { tick: u32 },
    /// Orbits a fixed center with a pulsing radius; velocity is unused.
    Spiral {
        center_x: f32,
        center_y: f32,
        angle: f32,
        radius: f32,
        expanding: bool,
    },
    /// The Mage's bolt.  Constant velocity, hurts the boss instead.
    PlayerFired,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    pub size: f32,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn straight(x: f32, y: f32, vx: f32, vy: f32, damage: i32) -> Self {
        Projectile {
            x,
            y,
            vx,
            vy,
            damage,
            size: ENEMY_PROJECTILE_SIZE,
            kind: ProjectileKind::Straight,
        }
    }

    pub fn zigzag(x: f32, y: f32, vx: f32, vy: f32, damage: i32) -> Self {
        Projectile {
            x,
            y,
            vx,
            vy,
            damage,
            size: ENEMY_PROJECTILE_SIZE,
            kind: ProjectileKind::ZigZag { tick: 0 },
        }
    }

    /// A spiral orbiter centered on its spawn point.  It sits at the center
    /// until the first [`advance`](Self::advance) swings it out.
    pub fn spiral(x: f32, y: f32, angle: f32, damage: i32) -> Self {
        Projectile {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            damage,
            size: ENEMY_PROJECTILE_SIZE,
            kind: ProjectileKind::Spiral {
                center_x: x,
                center_y: y,
                angle,
                radius: SPIRAL_MIN_RADIUS,
                expanding: true,
            },
        }
    }

    pub fn player_fired(x: f32, y: f32, vx: f32, vy: f32, damage: i32) -> Self {
        Projectile {
            x,
            y,
            vx,
            vy,
            damage,
            size: PLAYER_PROJECTILE_SIZE,
            kind: ProjectileKind::PlayerFired,
        }
    }

    /// Anything not fired by the player endangers the player.
    pub fn is_enemy(&self) -> bool {
        self.kind != ProjectileKind::PlayerFired
    }

    /// One tick of motion under this projectile's law.
    pub fn advance(&mut self) {
        match &mut self.kind {
            ProjectileKind::Straight | ProjectileKind::PlayerFired => {
                self.x += self.vx;
                self.y += self.vy;
            }
            ProjectileKind::ZigZag { tick } => {
                *tick += 1;
                self.x += self.vx + (*tick as f32 * ZIGZAG_FREQ).sin() * ZIGZAG_AMP;
                self.y += self.vy;
            }
            ProjectileKind::Spiral {
                center_x,
                center_y,
                angle,
                radius,
                expanding,
            } => {
                *angle += SPIRAL_ANGLE_STEP;
                if *expanding {
                    *radius += SPIRAL_RADIUS_STEP;
                    if *radius >= SPIRAL_MAX_RADIUS {
                        *expanding = false;
                    }
                } else {
                    *radius -= SPIRAL_RADIUS_STEP;
                    if *radius <= SPIRAL_MIN_RADIUS {
                        *expanding = true;
                    }
                }
                self.x = *center_x + angle.cos() * *radius;
                self.y = *center_y + angle.sin() * *radius;
            }
        }
    }

    /// True once the projectile has drifted the off-arena margin past any
    /// edge.  Exactly on the margin counts as gone.
    pub fn is_off_arena(&self) -> bool {
        self.x <= -OFF_ARENA_MARGIN
            || self.x >= ARENA_W as f32 + OFF_ARENA_MARGIN
            || self.y <= -OFF_ARENA_MARGIN
            || self.y >= ARENA_H as f32 + OFF_ARENA_MARGIN
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Restores 10 health, capped at the class maximum.
    Heart,
    /// Grants 5 seconds of projectile immunity.
    Shield,
    /// Clears every enemy projectile in flight.
    Orb,
    /// A trap: 15 damage plus a flash, shake, and explosion burst.
    Bomb,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind, x: i32, y: i32) -> Self {
        Item {
            x,
            y,
            size: ITEM_SIZE,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.size as f32,
            self.size as f32,
        )
    }
}

// ── Transients ────────────────────────────────────────────────────────────────

pub const DAMAGE_NUMBER_LIFETIME_MS: u64 = 800;
const DAMAGE_NUMBER_RISE: f32 = 1.5;

/// A floating combat-damage readout that drifts upward and fades.
#[derive(Clone, Debug)]
pub struct DamageNumber {
    pub amount: i32,
    pub x: f32,
    pub y: f32,
    pub spawned_at: u64,
}

impl DamageNumber {
    pub fn new(amount: i32, x: f32, y: f32, now_ms: u64) -> Self {
        DamageNumber {
            amount,
            x,
            y,
            spawned_at: now_ms,
        }
    }

    pub fn advance(&mut self) {
        self.y -= DAMAGE_NUMBER_RISE;
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms - self.spawned_at > DAMAGE_NUMBER_LIFETIME_MS
    }

    /// Fraction of the lifetime spent, clamped to [0, 1].
    pub fn age_fraction(&self, now_ms: u64) -> f32 {
        ((now_ms - self.spawned_at) as f32 / DAMAGE_NUMBER_LIFETIME_MS as f32).min(1.0)
    }
}

const TRAIL_LIFETIME_MS: u64 = 300;
const TRAIL_SIZE: i32 = 3;
const PARTICLE_DAMPING: f32 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleTint {
    PlayerTrail,
    EnemyTrail,
}

/// A decorative spark with decaying velocity and a fixed lifetime.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub tint: ParticleTint,
    pub spawned_at: u64,
    pub lifetime_ms: u64,
    pub size: i32,
}

impl Particle {
    /// A trail mote at a projectile's center with a small random drift.
    pub fn trail(x: f32, y: f32, tint: ParticleTint, now_ms: u64, rng: &mut impl Rng) -> Self {
        Particle {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * 0.5,
            vy: (rng.gen::<f32>() - 0.5) * 0.5,
            tint,
            spawned_at: now_ms,
            lifetime_ms: TRAIL_LIFETIME_MS,
            size: TRAIL_SIZE,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= PARTICLE_DAMPING;
        self.vy *= PARTICLE_DAMPING;
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms - self.spawned_at > self.lifetime_ms
    }

    pub fn age_fraction(&self, now_ms: u64) -> f32 {
        ((now_ms - self.spawned_at) as f32 / self.lifetime_ms as f32).min(1.0)
    }
}
