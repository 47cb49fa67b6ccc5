//! Session lifecycle: menu phases, the master session state, pause, and
//! restart.  Combat-tick logic lives in [`crate::engine`]; this module owns
//! everything around it.

use rand::Rng;

use crate::entities::{
    Boss, BossKind, DamageNumber, Item, Particle, Player, PlayerClass, Projectile, BOSS_SIZE,
};
use crate::events::{GameEvent, SoundCue};
use crate::geometry::{ARENA_H, ARENA_W};
use crate::spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Four fixed levels, then victory.
    Levels,
    /// Bosses cycle forever; the run ends only in defeat.
    Endless,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Nightmare,
}

impl Difficulty {
    /// Score multiplier for endless runs.  Level runs always score at 1x.
    pub fn score_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Nightmare => 2.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ModeSelect,
    DifficultySelect,
    CharacterSelect,
    Combat,
    Paused,
    Win,
    Lose,
}

/// One tick's worth of held input, sampled by the frontend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub dash: bool,
}

/// A numbered menu choice.  Menus with fewer than three options ignore the
/// spare slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSlot {
    One,
    Two,
    Three,
}

/// The whole game in one struct.  Timer fields hold absolute session-clock
/// deadlines ("until" times), so resuming from pause needs no per-timer
/// adjustment.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub phase: Phase,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub score_multiplier: f32,
    /// 1-based level counter.  Keeps climbing in endless mode.
    pub level: u32,
    pub score: u32,
    pub player: Option<Player>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub damage_numbers: Vec<DamageNumber>,
    pub particles: Vec<Particle>,
    /// Red damage-flash deadline.
    pub hit_flash_until: u64,
    pub shield_until: u64,
    pub explosion_until: u64,
    pub explosion_at: (i32, i32),
    pub deflection_until: u64,
    pub deflection_at: (f32, f32),
    pub shake_until: u64,
    /// Current camera offset, re-rolled every tick while the shake runs.
    pub shake_offset: (i32, i32),
    /// When the next item drops.
    pub next_item_spawn_at: u64,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            phase: Phase::ModeSelect,
            mode: GameMode::Levels,
            difficulty: Difficulty::Medium,
            score_multiplier: 1.0,
            level: 1,
            score: 0,
            player: None,
            boss: None,
            projectiles: Vec::new(),
            items: Vec::new(),
            damage_numbers: Vec::new(),
            particles: Vec::new(),
            hit_flash_until: 0,
            shield_until: 0,
            explosion_until: 0,
            explosion_at: (0, 0),
            deflection_until: 0,
            deflection_at: (0.0, 0.0),
            shake_until: 0,
            shake_offset: (0, 0),
            next_item_spawn_at: 0,
        }
    }

    pub fn shield_active(&self, now_ms: u64) -> bool {
        now_ms < self.shield_until
    }

    pub fn hit_flash_active(&self, now_ms: u64) -> bool {
        now_ms < self.hit_flash_until
    }

    pub fn explosion_active(&self, now_ms: u64) -> bool {
        now_ms < self.explosion_until
    }

    pub fn deflection_active(&self, now_ms: u64) -> bool {
        now_ms < self.deflection_until
    }

    pub fn shake_active(&self, now_ms: u64) -> bool {
        now_ms < self.shake_until
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            level: self.level,
            mode: self.mode,
            difficulty: self.difficulty,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}

/// End-of-run readout for results screens and logs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSummary {
    pub score: u32,
    pub level: u32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

/// Feed a numbered selection to whichever menu is active.  Selections made
/// outside a menu phase are ignored.
pub fn apply_menu_input(
    state: &mut SessionState,
    slot: MenuSlot,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match state.phase {
        Phase::ModeSelect => match slot {
            MenuSlot::One => {
                state.mode = GameMode::Levels;
                state.score_multiplier = 1.0;
                state.phase = Phase::CharacterSelect;
                events.push(GameEvent::Sound(SoundCue::Click));
            }
            MenuSlot::Two => {
                state.mode = GameMode::Endless;
                state.phase = Phase::DifficultySelect;
                events.push(GameEvent::Sound(SoundCue::Click));
            }
            MenuSlot::Three => {}
        },
        Phase::DifficultySelect => {
            let difficulty = match slot {
                MenuSlot::One => Difficulty::Easy,
                MenuSlot::Two => Difficulty::Medium,
                MenuSlot::Three => Difficulty::Nightmare,
            };
            state.difficulty = difficulty;
            state.score_multiplier = difficulty.score_multiplier();
            state.phase = Phase::CharacterSelect;
            events.push(GameEvent::Sound(SoundCue::Click));
        }
        Phase::CharacterSelect => {
            let class = match slot {
                MenuSlot::One => PlayerClass::Warrior,
                MenuSlot::Two => PlayerClass::Rogue,
                MenuSlot::Three => PlayerClass::Mage,
            };
            events.push(GameEvent::Sound(SoundCue::Click));
            begin_combat(state, class, now_ms, rng);
        }
        _ => {}
    }
    events
}

/// Level-transition spawn point, centered for the given body width.
pub fn player_spawn(width: i32) -> (i32, i32) {
    (ARENA_W / 2 - width / 2, ARENA_H - 100)
}

/// Boss spawn point, centered in the arena.
pub fn boss_spawn() -> (i32, i32) {
    (ARENA_W / 2 - BOSS_SIZE / 2, ARENA_H / 2 - BOSS_SIZE / 2)
}

fn begin_combat(state: &mut SessionState, class: PlayerClass, now_ms: u64, rng: &mut impl Rng) {
    // Every class starts from the same bottom-center point; only level
    // transitions re-center by body width.
    state.player = Some(Player::new(class, ARENA_W / 2 - 20, ARENA_H - 100));
    let (bx, by) = boss_spawn();
    state.boss = Some(Boss::new(BossKind::for_level(state.level), bx, by, now_ms));
    state.next_item_spawn_at = now_ms + spawner::random_spawn_delay_ms(state.level, rng);
    state.phase = Phase::Combat;
}

/// Flip between Combat and Paused.  Returns false (and does nothing) from
/// any other phase.
pub fn toggle_pause(state: &mut SessionState) -> bool {
    match state.phase {
        Phase::Combat => {
            state.phase = Phase::Paused;
            true
        }
        Phase::Paused => {
            state.phase = Phase::Combat;
            true
        }
        _ => false,
    }
}

/// Tear the run down and return to mode select.  Allowed from Paused, Win,
/// and Lose; returns false from anywhere else.  Mode and difficulty stick
/// around as defaults for the next run.
pub fn request_restart(state: &mut SessionState) -> bool {
    if !matches!(state.phase, Phase::Paused | Phase::Win | Phase::Lose) {
        return false;
    }
    state.phase = Phase::ModeSelect;
    state.level = 1;
    state.score = 0;
    state.player = None;
    state.boss = None;
    state.projectiles.clear();
    state.items.clear();
    state.damage_numbers.clear();
    state.particles.clear();
    state.hit_flash_until = 0;
    state.shield_until = 0;
    state.explosion_until = 0;
    state.explosion_at = (0, 0);
    state.deflection_until = 0;
    state.deflection_at = (0.0, 0.0);
    state.shake_until = 0;
    state.shake_offset = (0, 0);
    state.next_item_spawn_at = 0;
    true
}
