//! Game state
//!
//! The single mutable object the whole game runs on. The platform layer owns
//! exactly one `GameState`; reset replaces the struct wholesale so a stale
//! callback can never observe a half-reinitialized round.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::Pace;
use super::sched::Scheduler;
use super::zones::Zone;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start overlay is up; timers and input idle
    Attract,
    /// Replaying the sequence; `step` is the index most recently lit
    Playback { step: usize },
    /// Player taps are validated against the sequence
    AwaitInput,
    /// Level complete, next level pending
    LevelClear,
    /// Bonus: ball shown under its cup
    BonusReveal,
    /// Bonus: cups accept a single guess
    BonusAwait,
    /// Round ended
    GameOver(GameOverReason),
}

impl GamePhase {
    /// Whether taps are consumed in this phase
    pub fn accepts_input(self) -> bool {
        matches!(self, GamePhase::AwaitInput | GamePhase::BonusAwait)
    }
}

/// Why the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    WrongTap,
    WrongCup,
    Timeout,
}

impl GameOverReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverReason::WrongTap => "wrong tap",
            GameOverReason::WrongCup => "wrong cup",
            GameOverReason::Timeout => "out of time",
        }
    }
}

/// What kind of level is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Normal sequence-matching level
    Sequence,
    /// Cup-shuffle bonus level
    Bonus,
}

/// One-shot notifications for the platform layer (tones, HUD, overlay)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A tile lit up; play its tone
    ToneStarted(Zone),
    /// A new level began (value = current score/level)
    LevelStarted(u32),
    /// Reaction-time feedback from the level just completed
    PaceFeedback(Pace),
    /// A bonus round began
    BonusStarted,
    /// The bonus guess was right
    BonusWon,
    /// The round ended
    GameOver { reason: GameOverReason, score: u32 },
}

/// Complete game state for one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Sequence RNG
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Sequence vs. bonus level
    pub mode: GameMode,
    /// The zones the player must reproduce, one appended per level
    pub sequence: Vec<Zone>,
    /// Zones entered so far this level; always a prefix of `sequence`
    pub progress: Vec<Zone>,
    /// Level counter, monotonically increasing within a round
    pub score: u32,
    /// Playback interval in milliseconds, bounded by the difficulty module
    pub cadence_ms: u32,
    /// Input-window meter, drains from COUNTDOWN_START to 0
    pub countdown: u32,
    /// Board rotation in radians; rendering only, never hit-testing
    pub rotation: f32,
    /// Which cup hides the bonus ball
    pub ball_cup: usize,
    /// Tile currently lit, if any
    pub lit: Option<Zone>,
    /// Sim tick counter
    pub time_ticks: u64,
    /// Tick at which the current input window opened
    pub input_open_tick: Option<u64>,
    /// Pending delayed actions for this round
    pub sched: Scheduler,
    /// Drained each frame by the platform layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state in the attract phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Attract,
            mode: GameMode::Sequence,
            sequence: Vec::new(),
            progress: Vec::new(),
            score: 0,
            cadence_ms: CADENCE_DEFAULT_MS,
            countdown: COUNTDOWN_START,
            rotation: 0.0,
            ball_cup: 0,
            lit: None,
            time_ticks: 0,
            input_open_tick: None,
            sched: Scheduler::new(),
            events: Vec::new(),
        }
    }

    /// Reinitialize everything for a new round. The scheduler epoch carries
    /// over (bumped), so actions queued by the old round stay invalidated
    /// even though the rest of the struct is rebuilt from scratch.
    pub fn reset(&mut self, seed: u64) {
        self.sched.cancel_all();
        let sched = std::mem::take(&mut self.sched);
        let mut fresh = Self::new(seed);
        fresh.sched = sched;
        *self = fresh;
    }

    /// Hand the accumulated events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
