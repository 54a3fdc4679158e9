//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Simulation events are mapped to effects on every target; the Web Audio
//! player itself only exists in the browser build.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Enemy rammed the ship
    PlayerHit,
    /// A life was lost but the run goes on
    LifeLost,
    /// Run started
    RunStart,
    /// Pause toggled on
    Pause,
    /// Pause toggled off
    Resume,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// The effect that announces a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::Explosion),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            // The last life is covered by the game-over jingle
            GameEvent::LifeLost { lives_left } if *lives_left > 0 => Some(SoundEffect::LifeLost),
            GameEvent::LifeLost { .. } => None,
            GameEvent::RunStarted => Some(SoundEffect::RunStart),
            GameEvent::Paused => Some(SoundEffect::Pause),
            GameEvent::Resumed => Some(SoundEffect::Resume),
            GameEvent::RunEnded { .. } => Some(SoundEffect::GameOver),
            GameEvent::ReturnedToMenu => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::platform::PlatformError;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: AudioContext,
        volume: f32,
    }

    impl AudioManager {
        /// Fails outside a secure context or without Web Audio support
        pub fn new(settings: &Settings) -> Result<Self, PlatformError> {
            let ctx = AudioContext::new()
                .map_err(|e| PlatformError::Audio(format!("{:?}", e)))?;
            Ok(Self {
                ctx,
                volume: settings.effective_volume(),
            })
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }
        }

        /// Play the effect for every event in emission order
        pub fn play_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            self.resume();

            let ctx = &self.ctx;
            match effect {
                SoundEffect::Shoot => self.play_shoot(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
                SoundEffect::PlayerHit => self.play_player_hit(ctx, vol),
                SoundEffect::LifeLost => self.play_sequence(ctx, vol, &[300.0, 220.0], 0.12),
                SoundEffect::RunStart => {
                    self.play_sequence(ctx, vol, &[400.0, 500.0, 650.0, 800.0], 0.08)
                }
                SoundEffect::Pause => self.play_blip(ctx, vol, 600.0, 400.0),
                SoundEffect::Resume => self.play_blip(ctx, vol, 400.0, 600.0),
                SoundEffect::GameOver => {
                    self.play_sequence(ctx, vol, &[400.0, 350.0, 300.0, 200.0], 0.2)
                }
            }
        }

        // === Sound generators ===

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

        /// Shot - short descending zap
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Explosion - noisy crunch over a bass drop
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.01).ok();
                osc.frequency().set_value_at_time(90.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(600.0, t + 0.05).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.32).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }

        /// Player hit - heavy thud
        fn play_player_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.35)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }

        /// Single UI blip sliding between two pitches
        fn play_blip(&self, ctx: &AudioContext, vol: f32, from: f32, to: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Note sequence for jingles
        fn play_sequence(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
            for (i, freq) in freqs.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + step * 1.5)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + step * 2.0).ok();
                }
            }
        }
    }
}
