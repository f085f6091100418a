//! Audio system using Web Audio API
//!
//! Procedurally generated sound cues - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::error::AudioError;
use crate::settings::Settings;
use crate::sim::ValueTier;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Actor leaves the ground
    Jump,
    /// Deposit picked up (pitch rises with tier)
    Collect(ValueTier),
    /// Quota met
    Success,
    /// Countdown ran out
    Timeout,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) -> Result<(), AudioError> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Err(AudioError::Muted);
        }

        let ctx = self.ctx.as_ref().ok_or(AudioError::Unavailable)?;

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Collect(tier) => self.play_collect(ctx, vol, tier),
            SoundEffect::Success => self.play_success(ctx, vol),
            SoundEffect::Timeout => self.play_timeout(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), AudioError> {
        let osc = ctx
            .create_oscillator()
            .map_err(|_| AudioError::NodeCreation("oscillator"))?;
        let gain = ctx
            .create_gain()
            .map_err(|_| AudioError::NodeCreation("gain"))?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain)
            .map_err(|_| AudioError::NodeCreation("oscillator link"))?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(|_| AudioError::NodeCreation("destination link"))?;

        Ok((osc, gain))
    }

    /// Jump - quick upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        let (osc, gain) = self.create_osc(ctx, 300.0, OscillatorType::Square)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
        Ok(())
    }

    /// Collect - ding, one note per multiplier step
    fn play_collect(&self, ctx: &AudioContext, vol: f32, tier: ValueTier) -> Result<(), AudioError> {
        let notes = [660.0, 880.0, 1100.0];
        for (i, freq) in notes.iter().take(tier.multiplier() as usize).enumerate() {
            let delay = i as f64 * 0.06;
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }
        Ok(())
    }

    /// Success - rising major arpeggio
    fn play_success(&self, ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.45).ok();
        }
        Ok(())
    }

    /// Timeout - descending buzz
    fn play_timeout(&self, ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
        let (osc, gain) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.9).ok();
        Ok(())
    }
}
