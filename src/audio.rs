//! Collision and background cues
//!
//! Fire-and-forget by contract: cues are requested, never awaited, and a
//! failed or unsupported request is logged and dropped without touching the
//! simulation. On the web the crash cue is synthesized with the Web Audio
//! API (no sound files), and haptics go through `navigator.vibrate`.

/// A cue the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Impact sound on collision
    Crash,
    /// (Re)start the background loop from the beginning
    BackgroundStart,
    BackgroundPause,
    BackgroundResume,
    BackgroundStop,
}

/// Plays cues; implementations must never block
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Short vibration pulses; implementations must never block
pub trait HapticSink {
    fn vibrate(&mut self, pattern_ms: &[u32]);
}

/// Vibration pattern requested on collision
pub const CRASH_VIBRATION_MS: [u32; 3] = [100, 50, 100];

/// Silent sink for hosts without audio
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Inert sink for hosts without a vibration motor
#[derive(Debug, Default)]
pub struct NullHaptics;

impl HapticSink for NullHaptics {
    fn vibrate(&mut self, _pattern_ms: &[u32]) {}
}

/// Web Audio implementation (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct WebAudio {
    ctx: Option<web_sys::AudioContext>,
    background: Option<(web_sys::OscillatorNode, web_sys::GainNode)>,
}

#[cfg(target_arch = "wasm32")]
impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    pub fn new() -> Self {
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            background: None,
        }
    }

    /// Low sawtooth thump with a quick pitch and volume drop
    fn play_crash(ctx: &web_sys::AudioContext) {
        use web_sys::OscillatorType;

        let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
            return;
        };
        let now = ctx.current_time();
        osc.set_type(OscillatorType::Sawtooth);
        osc.frequency().set_value(120.0);
        let _ = osc.frequency().exponential_ramp_to_value_at_time(40.0, now + 0.25);
        gain.gain().set_value(0.5);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, now + 0.3);
        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        let _ = osc.start();
        let _ = osc.stop_with_when(now + 0.3);
    }

    fn start_background(&mut self) {
        self.stop_background();
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend fresh contexts until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
            return;
        };
        osc.set_type(web_sys::OscillatorType::Triangle);
        osc.frequency().set_value(55.0);
        gain.gain().set_value(0.08);
        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        let _ = osc.start();
        self.background = Some((osc, gain));
    }

    fn stop_background(&mut self) {
        if let Some((osc, _)) = self.background.take() {
            let _ = osc.stop();
        }
    }

    fn set_background_gain(&self, value: f32) {
        if let Some((_, gain)) = &self.background {
            gain.gain().set_value(value);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Crash => {
                if let Some(ctx) = &self.ctx {
                    if ctx.state() == web_sys::AudioContextState::Suspended {
                        let _ = ctx.resume();
                    }
                    Self::play_crash(ctx);
                }
            }
            Cue::BackgroundStart => self.start_background(),
            Cue::BackgroundPause => self.set_background_gain(0.0),
            Cue::BackgroundResume => self.set_background_gain(0.08),
            Cue::BackgroundStop => self.stop_background(),
        }
    }
}

/// `navigator.vibrate` implementation (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct WebHaptics;

#[cfg(target_arch = "wasm32")]
impl HapticSink for WebHaptics {
    fn vibrate(&mut self, pattern_ms: &[u32]) {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return;
        };
        let pattern = js_sys::Array::new();
        for ms in pattern_ms {
            pattern.push(&wasm_bindgen::JsValue::from(*ms));
        }
        if !navigator.vibrate_with_pattern(&pattern) {
            log::debug!("vibration request rejected");
        }
    }
}
