//! Tone synthesis via the Web Audio API
//!
//! One oscillator per tone, procedurally shaped - no audio files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Fire-and-forget tone player for game events
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume the audio context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    fn active_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Tile tone - a short sine at the zone's frequency, matching the
    /// highlight duration
    pub fn play_tone(&self, freq_hz: f32) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.active_ctx() else { return };
        let Some((osc, gain)) = self.create_osc(ctx, freq_hz, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.22)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Bonus win - happy ascending ding
    pub fn play_bonus_win(&self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.active_ctx() else { return };
        for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Game over - sad descending run
    pub fn play_game_over(&self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.active_ctx() else { return };
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// New best score - celebratory climb
    pub fn play_new_best(&self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.active_ctx() else { return };
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
