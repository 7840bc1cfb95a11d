//! Deterministic game state machine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; every delay is a tick deadline
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod sched;
pub mod state;
pub mod tick;
pub mod zones;

pub use difficulty::Pace;
pub use sched::{Action, Scheduler};
pub use state::{GameEvent, GameMode, GameOverReason, GamePhase, GameState};
pub use tick::{TickInput, advance_level, start_round, tick};
pub use zones::{Zone, point_to_cup, point_to_zone};
