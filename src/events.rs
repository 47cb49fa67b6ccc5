//! Events the simulation hands back each tick.  The core never touches an
//! audio device or a screen; it reports what happened and the frontend
//! decides what that sounds and looks like.

use crate::entities::ItemKind;

/// A named sound effect.  One cue per distinct audible moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Menu selection.
    Click,
    /// A level was cleared and the next one begins.
    LevelNext,
    Lose,
    /// The Mage launches a bolt.
    Mage,
    /// A melee swing connects with the boss body.
    Slash,
    Won,
    /// The boss takes damage, or a projectile is deflected.
    BossHit,
    /// The player takes projectile damage.
    Damage,
    /// A beneficial pickup.
    PickUped,
    /// A bomb pickup.
    Boom,
    Dash,
}

impl SoundCue {
    pub const ALL: [SoundCue; 11] = [
        SoundCue::Click,
        SoundCue::LevelNext,
        SoundCue::Lose,
        SoundCue::Mage,
        SoundCue::Slash,
        SoundCue::Won,
        SoundCue::BossHit,
        SoundCue::Damage,
        SoundCue::PickUped,
        SoundCue::Boom,
        SoundCue::Dash,
    ];

    /// File stem of the matching clip under the audio asset directory.
    /// These names are the shipped asset names, misspellings included.
    pub fn file_stem(&self) -> &'static str {
        match self {
            SoundCue::Click => "click",
            SoundCue::LevelNext => "level_next",
            SoundCue::Lose => "lose",
            SoundCue::Mage => "mage",
            SoundCue::Slash => "slash",
            SoundCue::Won => "won",
            SoundCue::BossHit => "boss_hit",
            SoundCue::Damage => "damage",
            SoundCue::PickUped => "pick_uped",
            SoundCue::Boom => "boom",
            SoundCue::Dash => "dash",
        }
    }
}

/// Everything notable a tick (or a menu action) produced, in the order it
/// happened.  Sound cues ride alongside the semantic events so a frontend
/// can drive audio without re-deriving game logic.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    PlayerDamaged { amount: i32 },
    BossDamaged { amount: i32 },
    /// A projectile was destroyed by a swing, at its last position.
    ProjectileDeflected { x: f32, y: f32 },
    ItemPickedUp { kind: ItemKind },
    BossDefeated { cleared_level: u32 },
    /// A fresh boss is in the arena at this 1-based level.
    LevelStarted { level: u32 },
    Victory,
    Defeat,
}
