// Host-side integration tests for the glitch loop.

use fx_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scheduler(config: GlitchConfig, seed: u64) -> (GlitchScheduler, MemorySink, GlitchTargets) {
    let mut sink = MemorySink::new();
    let targets = GlitchTargets {
        main: sink.spawn(),
        cyan: sink.spawn(),
        pink: sink.spawn(),
    };
    let glitch = GlitchScheduler::new(config, targets, StdRng::seed_from_u64(seed));
    (glitch, sink, targets)
}

fn always_fire() -> GlitchConfig {
    GlitchConfig {
        skip_probability: 0.0,
        ..GlitchConfig::default()
    }
}

#[test]
fn start_only_takes_effect_once() {
    let (mut glitch, _, _) = scheduler(GlitchConfig::default(), 1);
    assert_eq!(glitch.state(), GlitchState::Idle);
    assert!(glitch.start(5.0));
    assert_eq!(glitch.state(), GlitchState::Looping { next_wake_at: 5.0 });
    assert!(!glitch.start(6.0));
    assert_eq!(glitch.state(), GlitchState::Looping { next_wake_at: 5.0 });
}

#[test]
fn wake_before_start_is_inactive() {
    let (mut glitch, _, _) = scheduler(GlitchConfig::default(), 2);
    assert_eq!(glitch.wake(0.0), WakeOutcome::Inactive);
    assert_eq!(glitch.counters(), (0, 0));
}

#[test]
fn emission_rate_matches_skip_probability() {
    let (mut glitch, _, _) = scheduler(GlitchConfig::default(), 42);
    glitch.start(0.0);
    let mut now = 0.0;
    for _ in 0..1000 {
        glitch.wake(now);
        now += 3.0;
    }
    let (wakes, emitted) = glitch.counters();
    assert_eq!(wakes, 1000);
    // p = 0.4, sigma ~ 15.5 over 1000 trials; allow 5 sigma.
    assert!(
        (323..=477).contains(&emitted),
        "emitted {} of {}",
        emitted,
        wakes
    );
}

#[test]
fn every_wake_reschedules_within_interval_bounds() {
    let (mut glitch, _, _) = scheduler(GlitchConfig::default(), 7);
    glitch.start(0.0);
    let mut now = 0.0;
    for _ in 0..200 {
        glitch.wake(now);
        let GlitchState::Looping { next_wake_at } = glitch.state() else {
            panic!("loop exited: {:?}", glitch.state());
        };
        let wait = next_wake_at - now;
        assert!((2.0..=5.0).contains(&wait), "wait {}", wait);
        now = next_wake_at;
    }
}

#[test]
fn all_variants_are_chosen() {
    let (mut glitch, _, _) = scheduler(always_fire(), 11);
    glitch.start(0.0);
    let mut seen = Vec::new();
    for i in 0..100 {
        if let WakeOutcome::Emitted(v) = glitch.wake(i as f64 * 5.0) {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
    }
    assert_eq!(seen.len(), GlitchVariant::ALL.len());
}

#[test]
fn poll_waits_for_next_wake() {
    let (mut glitch, mut sink, _) = scheduler(always_fire(), 3);
    glitch.start(1.0);
    assert_eq!(glitch.poll(0.5, &mut sink), None);
    assert!(glitch.poll(1.0, &mut sink).is_some());
    let GlitchState::Looping { next_wake_at } = glitch.state() else {
        panic!("not looping");
    };
    assert_eq!(glitch.poll(next_wake_at - 0.01, &mut sink), None);
    assert!(glitch.poll(next_wake_at, &mut sink).is_some());
}

#[test]
fn glitch_returns_layers_to_rest() {
    for seed in 0..12 {
        let (mut glitch, mut sink, targets) = scheduler(always_fire(), seed);
        glitch.start(0.0);
        let variant = glitch.poll(0.0, &mut sink);
        assert!(variant.is_some());
        glitch.poll(0.02, &mut sink);
        glitch.poll(0.2, &mut sink);

        match variant {
            Some(GlitchVariant::SkewPulse) => {
                assert_eq!(sink.state(targets.main).skew_x, GLITCH_BASE_SKEW_DEG)
            }
            Some(GlitchVariant::ColorFlash) => {
                let pink = sink.state(targets.pink);
                assert_eq!(pink.opacity, Some(0.0));
                assert_eq!(pink.x, 0.0);
            }
            Some(GlitchVariant::Jitter) => assert_eq!(sink.state(targets.cyan).x, 0.0),
            None => unreachable!(),
        }
    }
}

#[test]
fn variant_timelines_are_short() {
    let mut sink = MemorySink::new();
    let targets = GlitchTargets {
        main: sink.spawn(),
        cyan: sink.spawn(),
        pink: sink.spawn(),
    };
    let mut rng = StdRng::seed_from_u64(9);
    for v in GlitchVariant::ALL {
        let tl = v.timeline(&targets, &mut rng);
        assert_eq!(tl.len(), 2);
        assert!(tl.duration() > 0.0 && tl.duration() <= 0.1, "{:?}", v);
    }
}

#[test]
fn stop_is_idempotent_and_silences_writes() {
    let (mut glitch, mut sink, _) = scheduler(always_fire(), 5);
    glitch.start(0.0);
    glitch.poll(0.0, &mut sink);

    glitch.stop(&mut sink);
    let writes = sink.writes;
    glitch.stop(&mut sink);
    assert_eq!(glitch.state(), GlitchState::Stopped);
    assert_eq!(sink.writes, writes);

    for i in 0..50 {
        assert_eq!(glitch.poll(i as f64 * 0.5, &mut sink), None);
    }
    assert_eq!(sink.writes, writes);
    assert_eq!(glitch.wake(100.0), WakeOutcome::Inactive);
    assert!(!glitch.start(100.0));
}

// Seed whose first wake emits `variant`.
fn scheduler_emitting(variant: GlitchVariant) -> (GlitchScheduler, MemorySink, GlitchTargets) {
    for seed in 0..500 {
        let (mut glitch, mut sink, targets) = scheduler(always_fire(), seed);
        glitch.start(0.0);
        if glitch.poll(0.0, &mut sink) == Some(variant) {
            return (glitch, sink, targets);
        }
    }
    panic!("no seed emits {:?}", variant);
}

#[test]
fn stop_mid_flight_leaves_layers_at_rest() {
    for variant in GlitchVariant::ALL {
        let (mut glitch, mut sink, t) = scheduler_emitting(variant);
        glitch.poll(0.02, &mut sink);
        glitch.stop(&mut sink);

        match variant {
            GlitchVariant::SkewPulse => {
                assert_eq!(sink.read(t.main, Property::SkewX), GLITCH_BASE_SKEW_DEG)
            }
            GlitchVariant::ColorFlash => {
                assert_eq!(sink.read(t.pink, Property::Opacity), 0.0);
                assert_eq!(sink.read(t.pink, Property::X), 0.0);
            }
            GlitchVariant::Jitter => assert_eq!(sink.read(t.cyan, Property::X), 0.0),
        }
    }
}

#[test]
fn cancelled_glitch_settles_on_next_poll() {
    let (mut glitch, mut sink, t) = scheduler_emitting(GlitchVariant::ColorFlash);
    glitch.poll(0.02, &mut sink);
    glitch.cancel_token().cancel();
    assert_eq!(glitch.poll(0.03, &mut sink), None);
    assert_eq!(glitch.state(), GlitchState::Stopped);
    assert_eq!(sink.read(t.pink, Property::Opacity), 0.0);
    assert_eq!(sink.read(t.pink, Property::X), 0.0);
}

#[test]
fn cancel_token_stops_loop_on_next_poll() {
    let (mut glitch, mut sink, _) = scheduler(always_fire(), 6);
    let token = glitch.cancel_token();
    glitch.start(0.0);
    token.cancel();
    assert_eq!(glitch.poll(0.0, &mut sink), None);
    assert_eq!(glitch.state(), GlitchState::Stopped);
    assert_eq!(glitch.counters(), (0, 0));
}

#[test]
fn config_is_sanitized() {
    let raw = GlitchConfig {
        min_interval: f64::NAN,
        interval_range: -3.0,
        skip_probability: 4.0,
    };
    let (glitch, _, _) = scheduler(raw, 0);
    let c = glitch.config();
    assert_eq!(c.min_interval, GLITCH_MIN_INTERVAL_SEC);
    assert_eq!(c.interval_range, 0.0);
    assert_eq!(c.skip_probability, 1.0);
}
