//! Whole-engine properties over random seeds and orb counts

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use orb_arena::{CollisionKind, CueSink, Settings, SimulationEngine, SoundRef};
use proptest::prelude::*;

#[derive(Default)]
struct CueLog {
    cues: Vec<(SoundRef, f32)>,
}

impl CueSink for CueLog {
    fn play_cue(&mut self, sound: SoundRef, volume: f32) {
        self.cues.push((sound, volume));
    }
}

fn crowded_engine(seed: u64, orbs: usize, speed: f32) -> SimulationEngine {
    let mut engine = SimulationEngine::new(Settings::default(), seed);
    engine.set_speed_param(speed);
    for _ in 0..orbs {
        engine.spawn();
    }
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn orbs_stay_inside_arena(seed in any::<u64>(), orbs in 1usize..40, speed in 0.0f32..10.0) {
        let mut engine = crowded_engine(seed, orbs, speed);
        let arena = *engine.arena();
        for _ in 0..300 {
            engine.tick();
            for body in engine.bodies() {
                prop_assert!(arena.contains(body.pos, body.size), "{:?} escaped", body);
                prop_assert!(body.vel.is_finite());
            }
        }
    }

    #[test]
    fn at_most_one_cue_per_kind_per_tick(seed in any::<u64>(), orbs in 2usize..40) {
        let mut engine = crowded_engine(seed, orbs, 10.0);
        for _ in 0..200 {
            let events = engine.tick();
            let mut seen: HashMap<_, usize> = HashMap::new();
            for event in &events {
                *seen.entry((event.body, event.kind)).or_default() += 1;
            }
            prop_assert!(seen.values().all(|&n| n == 1));
        }
    }

    #[test]
    fn spawning_adds_exactly_n(seed in any::<u64>(), first in 0usize..10, extra in 1usize..20) {
        let mut engine = crowded_engine(seed, first, 1.0);
        let before = engine.bodies().to_vec();
        for _ in 0..extra {
            let body = engine.spawn();
            prop_assert!(body.size >= 10.0 && body.size < 60.0);
        }
        prop_assert_eq!(engine.body_count(), first + extra);
        prop_assert_eq!(&engine.bodies()[..first], &before[..]);

        let mut ids: Vec<_> = engine.bodies().iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), first + extra);
    }
}

#[test]
fn cue_sink_hears_every_event() {
    let mut engine = crowded_engine(2024, 30, 10.0);
    let log = Rc::new(RefCell::new(CueLog::default()));
    engine.attach_cue_sink(log.clone());

    engine.start();
    let mut total = 0;
    for _ in 0..500 {
        total += engine.advance(Duration::from_millis(16)).len();
    }
    engine.stop();

    assert_eq!(engine.tick_count(), 500);
    assert!(total > 0, "30 fast orbs should hit something in 500 ticks");
    assert_eq!(log.borrow().cues.len(), total);
    assert!(log.borrow().cues.iter().all(|&(_, v)| v > 0.0 && v <= 1.0));
}

#[test]
fn stopped_engine_fires_nothing() {
    let mut engine = crowded_engine(8, 10, 5.0);
    let log = Rc::new(RefCell::new(CueLog::default()));
    engine.attach_cue_sink(log.clone());

    engine.start();
    engine.advance(Duration::from_millis(160));
    engine.stop();
    let ticks = engine.tick_count();
    let cues = log.borrow().cues.len();

    for _ in 0..10 {
        assert!(engine.advance(Duration::from_millis(16)).is_empty());
    }
    assert_eq!(engine.tick_count(), ticks);
    assert_eq!(log.borrow().cues.len(), cues);
}

#[test]
fn muted_settings_silence_cues() {
    let settings = Settings {
        muted: true,
        ..Settings::default()
    };
    let mut engine = SimulationEngine::new(settings, 77);
    engine.set_speed_param(10.0);
    for _ in 0..30 {
        engine.spawn();
    }
    let log = Rc::new(RefCell::new(CueLog::default()));
    engine.attach_cue_sink(log.clone());

    let events: usize = (0..300).map(|_| engine.tick().len()).sum();
    assert!(events > 0);
    assert!(log.borrow().cues.is_empty());
}

#[test]
fn wall_and_orb_events_are_tagged() {
    let mut engine = crowded_engine(31337, 40, 10.0);
    let mut kinds = (0, 0);
    for _ in 0..600 {
        for event in engine.tick() {
            match event.kind {
                CollisionKind::Wall => kinds.0 += 1,
                CollisionKind::Body => kinds.1 += 1,
            }
        }
    }
    assert!(kinds.0 > 0);
    assert!(kinds.1 > 0);
}
