//! Boss-battle arena simulation core.
//!
//! The library is the deterministic half of the game: entity state, the
//! fixed-order combat tick, the phase state machine, and the item spawn
//! director.  Every update is a function of (state, clock, input, rng) — the
//! binary owns the real clock, the keyboard, and the render/audio sinks, and
//! consumes the events each tick returns.

pub mod combat;
pub mod engine;
pub mod entities;
pub mod events;
pub mod geometry;
pub mod patterns;
pub mod session;
pub mod spawner;
