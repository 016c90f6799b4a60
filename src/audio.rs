//! Audio cue output
//!
//! The simulation never plays sound itself. Collision events are forwarded to
//! an injected [`CueSink`] through a [`CueTrigger`], which applies the master
//! volume and mute state. Sinks are fire-and-forget: failures stay inside the
//! sink and are logged.

use crate::engine::CollisionListener;
use crate::settings::Settings;
use crate::sim::{CollisionEvent, SoundRef};

/// Something that can play a catalog sound at a given volume
pub trait CueSink {
    /// Start playback and return immediately. Must not panic.
    fn play_cue(&mut self, sound: SoundRef, volume: f32);
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play_cue(&mut self, sound: SoundRef, volume: f32) {
        (**self).play_cue(sound, volume);
    }
}

impl<S: CueSink> CueSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn play_cue(&mut self, sound: SoundRef, volume: f32) {
        self.borrow_mut().play_cue(sound, volume);
    }
}

/// Fixed-size set of `sound{n}.wav` files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundCatalog {
    base_path: String,
    count: u32,
}

impl SoundCatalog {
    pub fn new(base_path: impl Into<String>, count: u32) -> Self {
        Self {
            base_path: base_path.into(),
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn contains(&self, sound: SoundRef) -> bool {
        sound.0 < self.count
    }

    /// Resource location for a sound (files are numbered from 1)
    pub fn url(&self, sound: SoundRef) -> String {
        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            format!("sound{}.wav", sound.0 + 1)
        } else {
            format!("{}/sound{}.wav", base, sound.0 + 1)
        }
    }
}

/// Collision listener that turns events into cues
pub struct CueTrigger<S> {
    sink: S,
    master_volume: f32,
    muted: bool,
}

impl<S: CueSink> CueTrigger<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut trigger = Self::new(sink);
        trigger.set_master_volume(settings.master_volume);
        trigger.set_muted(settings.muted);
        trigger
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final playback volume for an event's volume hint
    pub fn effective_volume(&self, hint: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (hint * self.master_volume).clamp(0.0, 1.0)
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: CueSink> CollisionListener for CueTrigger<S> {
    fn on_collision(&mut self, event: &CollisionEvent) {
        let vol = self.effective_volume(event.volume);
        if vol <= 0.0 {
            return;
        }
        self.sink.play_cue(event.sound, vol);
    }
}

/// Native sink: logs each cue instead of playing it
#[derive(Debug, Clone)]
pub struct LogCueSink {
    catalog: SoundCatalog,
    played: u64,
}

impl LogCueSink {
    pub fn new(catalog: SoundCatalog) -> Self {
        Self { catalog, played: 0 }
    }

    /// Number of cues received so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl CueSink for LogCueSink {
    fn play_cue(&mut self, sound: SoundRef, volume: f32) {
        if !self.catalog.contains(sound) {
            log::warn!("Cue {:?} is outside the {}-sound catalog", sound, self.catalog.count());
            return;
        }
        self.played += 1;
        log::debug!("cue {} at volume {:.2}", self.catalog.url(sound), volume);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioCueSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::ArrayBuffer;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioBuffer, AudioContext, Response};

    use super::{CueSink, SoundCatalog};
    use crate::sim::SoundRef;

    /// Fetches, decodes and plays catalog sounds through Web Audio
    pub struct WebAudioCueSink {
        ctx: Option<AudioContext>,
        catalog: SoundCatalog,
    }

    impl WebAudioCueSink {
        pub fn new(catalog: SoundCatalog) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, catalog }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }

    impl CueSink for WebAudioCueSink {
        fn play_cue(&mut self, sound: SoundRef, volume: f32) {
            let Some(ctx) = self.ctx.clone() else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let url = self.catalog.url(sound);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = play_url(&ctx, &url, volume).await {
                    log::warn!("Cue {} not played: {:?}", url, err);
                }
            });
        }
    }

    async fn play_url(ctx: &AudioContext, url: &str, volume: f32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;

        let content_type = response.headers().get("content-type")?.unwrap_or_default();
        if !content_type.contains("audio") {
            return Err(JsValue::from_str(&format!("content type = {}", content_type)));
        }

        let bytes: ArrayBuffer = JsFuture::from(response.array_buffer()?).await?.dyn_into()?;
        let buffer: AudioBuffer = JsFuture::from(ctx.decode_audio_data(&bytes)?).await?.dyn_into()?;

        let source = ctx.create_buffer_source()?;
        let gain = ctx.create_gain()?;
        gain.gain().set_value(volume);
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        source.start()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::sim::{BodyId, CollisionKind};

    #[derive(Default)]
    struct Recorder {
        cues: Vec<(SoundRef, f32)>,
    }

    impl CueSink for Recorder {
        fn play_cue(&mut self, sound: SoundRef, volume: f32) {
            self.cues.push((sound, volume));
        }
    }

    fn event(volume: f32) -> CollisionEvent {
        CollisionEvent {
            body: BodyId(1),
            kind: CollisionKind::Wall,
            sound: SoundRef(3),
            volume,
        }
    }

    #[test]
    fn test_catalog_urls_are_one_based() {
        let catalog = SoundCatalog::new("/static/sounds/", 20);
        assert_eq!(catalog.url(SoundRef(0)), "/static/sounds/sound1.wav");
        assert_eq!(catalog.url(SoundRef(19)), "/static/sounds/sound20.wav");
        assert!(catalog.contains(SoundRef(19)));
        assert!(!catalog.contains(SoundRef(20)));
    }

    #[test]
    fn test_trigger_scales_by_master_volume() {
        let mut trigger = CueTrigger::new(Recorder::default());
        trigger.set_master_volume(0.5);
        trigger.on_collision(&event(0.8));
        let cues = &trigger.sink().cues;
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].0, SoundRef(3));
        assert!((cues[0].1 - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_trigger_muted_skips_sink() {
        let mut trigger = CueTrigger::new(Recorder::default());
        trigger.set_muted(true);
        trigger.on_collision(&event(0.8));
        assert!(trigger.into_inner().cues.is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let trigger = CueTrigger::new(Recorder::default());
        assert_eq!(trigger.effective_volume(3.0), 1.0);
    }

    #[test]
    fn test_shared_sink_through_rc() {
        let shared = Rc::new(RefCell::new(Recorder::default()));
        let mut trigger = CueTrigger::new(shared.clone());
        trigger.on_collision(&event(0.5));
        trigger.on_collision(&event(0.25));
        assert_eq!(shared.borrow().cues.len(), 2);
    }

    #[test]
    fn test_log_sink_counts_known_sounds() {
        let mut sink = LogCueSink::new(SoundCatalog::new("sounds", 4));
        sink.play_cue(SoundRef(1), 0.3);
        sink.play_cue(SoundRef(9), 0.3);
        assert_eq!(sink.played(), 1);
    }
}
