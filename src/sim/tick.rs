//! Fixed timestep game tick
//!
//! Advances the round deterministically: playback scheduling, input
//! validation, the bonus round, the countdown, and the game-over flow all
//! run off tick deadlines queued in the scheduler.

use rand::Rng;

use super::difficulty;
use super::sched::Action;
use super::state::{GameEvent, GameMode, GameOverReason, GamePhase, GameState};
use super::zones::{self, Zone, point_to_cup, point_to_zone};
use crate::consts::*;
use crate::{ms_to_ticks, ticks_to_ms};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap position in logical canvas coordinates, if one landed this tick
    pub tap: Option<(f64, f64)>,
}

/// Reset everything and begin a new round
pub fn start_round(state: &mut GameState, seed: u64) {
    state.reset(seed);
    advance_level(state);
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Attract | GamePhase::GameOver(_) => return,
        _ => {}
    }

    state.time_ticks += 1;

    // Late-game visual escalation; never consulted for hit-testing
    if state.score > ROTATION_SCORE_THRESHOLD && state.phase.accepts_input() {
        state.rotation += ROTATION_STEP_RAD;
    }

    // Taps land before timers so a tap on the timeout tick still counts
    if let Some((x, y)) = input.tap {
        handle_tap(state, x, y);
    }

    for action in state.sched.drain_due(state.time_ticks) {
        // A timeout in this batch ends the round; nothing after it may run
        if matches!(state.phase, GamePhase::GameOver(_)) {
            break;
        }
        apply_action(state, action);
    }
}

/// Append one random zone, bump the score, and kick off the level. Every
/// BONUS_EVERY-th level branches into the cup round instead of playback.
pub fn advance_level(state: &mut GameState) {
    state.progress.clear();
    state.score += 1;
    let zone = Zone::ALL[state.rng.random_range(0..Zone::ALL.len())];
    state.sequence.push(zone);
    state.events.push(GameEvent::LevelStarted(state.score));

    if state.score % BONUS_EVERY == 0 {
        state.mode = GameMode::Bonus;
        state.ball_cup = state.rng.random_range(0..zones::CUP_SLOTS.len());
        state.phase = GamePhase::BonusReveal;
        state.events.push(GameEvent::BonusStarted);
        state
            .sched
            .schedule(state.time_ticks, ms_to_ticks(BONUS_REVEAL_MS), Action::HideBall);
    } else {
        state.mode = GameMode::Sequence;
        state.phase = GamePhase::Playback { step: 0 };
        state
            .sched
            .schedule(state.time_ticks, ms_to_ticks(LEVEL_PACING_MS), Action::PlayStep(0));
    }
}

fn handle_tap(state: &mut GameState, x: f64, y: f64) {
    match state.phase {
        GamePhase::AwaitInput => {
            // A tap hitting no tile is not a miss; it is nothing
            let Some(zone) = point_to_zone(x, y) else {
                return;
            };
            flash(state, zone);
            let expected = state.sequence[state.progress.len()];
            if zone != expected {
                game_over(state, GameOverReason::WrongTap);
            } else {
                state.progress.push(zone);
                if state.progress.len() == state.sequence.len() {
                    level_complete(state);
                }
            }
        }
        GamePhase::BonusAwait => {
            let Some(cup) = point_to_cup(x, y) else {
                return;
            };
            if cup == state.ball_cup {
                state.score += BONUS_SCORE;
                state.events.push(GameEvent::BonusWon);
                close_input(state);
                state.phase = GamePhase::LevelClear;
                state
                    .sched
                    .schedule(state.time_ticks, ms_to_ticks(ADVANCE_MS), Action::Advance);
            } else {
                game_over(state, GameOverReason::WrongCup);
            }
        }
        // Taps outside the input window are dropped
        _ => {}
    }
}

fn apply_action(state: &mut GameState, action: Action) {
    match action {
        Action::PlayStep(step) => {
            state.phase = GamePhase::Playback { step };
            let zone = state.sequence[step];
            flash(state, zone);
            let cadence = ms_to_ticks(state.cadence_ms);
            if step + 1 < state.sequence.len() {
                state
                    .sched
                    .schedule(state.time_ticks, cadence, Action::PlayStep(step + 1));
            } else {
                // Let the last flash breathe, then settle into the input window
                state.sched.schedule(
                    state.time_ticks,
                    cadence + ms_to_ticks(SETTLE_MS),
                    Action::OpenInput,
                );
            }
        }
        Action::EndHighlight => {
            state.lit = None;
        }
        Action::OpenInput => {
            state.phase = GamePhase::AwaitInput;
            open_input(state);
        }
        Action::HideBall => {
            state.phase = GamePhase::BonusAwait;
            open_input(state);
        }
        Action::Advance => advance_level(state),
        Action::CountdownTick => {
            if !state.phase.accepts_input() {
                return;
            }
            state.countdown = state.countdown.saturating_sub(1);
            if state.countdown == 0 {
                game_over(state, GameOverReason::Timeout);
            } else {
                schedule_countdown_tick(state);
            }
        }
    }
}

/// Light a tile and sound its tone; the highlight reverts on a short fuse
fn flash(state: &mut GameState, zone: Zone) {
    state.lit = Some(zone);
    state.events.push(GameEvent::ToneStarted(zone));
    state
        .sched
        .schedule(state.time_ticks, ms_to_ticks(HIGHLIGHT_MS), Action::EndHighlight);
}

/// Open the input window: fresh countdown, reaction clock started
fn open_input(state: &mut GameState) {
    state.countdown = COUNTDOWN_START;
    state.input_open_tick = Some(state.time_ticks);
    schedule_countdown_tick(state);
}

fn schedule_countdown_tick(state: &mut GameState) {
    let period = difficulty::countdown_period_ms(state.cadence_ms);
    state
        .sched
        .schedule(state.time_ticks, ms_to_ticks(period), Action::CountdownTick);
}

/// Close the input window without ending the round
fn close_input(state: &mut GameState) {
    state.sched.cancel_where(|a| a == Action::CountdownTick);
    state.input_open_tick = None;
}

fn level_complete(state: &mut GameState) {
    // Reaction time for the whole level drives the next cadence
    let reaction_ms = state
        .input_open_tick
        .map(|open| ticks_to_ms(state.time_ticks - open))
        .unwrap_or(0);
    let pace = difficulty::adjust_cadence(&mut state.cadence_ms, reaction_ms);
    state.events.push(GameEvent::PaceFeedback(pace));

    close_input(state);
    state.phase = GamePhase::LevelClear;
    state
        .sched
        .schedule(state.time_ticks, ms_to_ticks(ADVANCE_MS), Action::Advance);
}

fn game_over(state: &mut GameState, reason: GameOverReason) {
    // Invalidate every pending action; nothing queued by this round may fire
    state.sched.cancel_all();
    state.lit = None;
    state.input_open_tick = None;
    state.phase = GamePhase::GameOver(reason);
    state.events.push(GameEvent::GameOver {
        reason,
        score: state.score,
    });
}
