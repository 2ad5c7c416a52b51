// Host-side tests for easing, pointer, scroll and config helpers.

use fx_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn easing_endpoints_are_exact() {
    let curves = [
        Easing::Linear,
        Easing::PowerIn(2),
        Easing::PowerOut(3),
        Easing::PowerInOut(4),
        Easing::BackOut(1.7),
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        },
    ];
    for e in curves {
        assert_eq!(e.apply(0.0), 0.0, "{:?}", e);
        assert_eq!(e.apply(1.0), 1.0, "{:?}", e);
        assert_eq!(e.apply(-3.0), 0.0, "{:?}", e);
        assert_eq!(e.apply(7.0), 1.0, "{:?}", e);
    }
}

#[test]
fn power_out_is_monotonic_and_front_loaded() {
    let e = Easing::PowerOut(2);
    let mut last = 0.0;
    for i in 1..=100 {
        let v = e.apply(i as f32 / 100.0);
        assert!(v >= last);
        last = v;
    }
    assert!(e.apply(0.5) > 0.5);
}

#[test]
fn back_and_elastic_overshoot() {
    let back = Easing::BackOut(1.7);
    assert!((1..100).any(|i| back.apply(i as f32 / 100.0) > 1.0));
    let elastic: Easing = "elastic.out(1, 0.5)".parse().unwrap();
    assert!((1..100).any(|i| elastic.apply(i as f32 / 100.0) > 1.0));
}

#[test]
fn easing_identifiers_parse() {
    assert_eq!("power2.out".parse::<Easing>().unwrap(), Easing::PowerOut(2));
    assert_eq!("power3".parse::<Easing>().unwrap(), Easing::PowerOut(3));
    assert_eq!("power1.inOut".parse::<Easing>().unwrap(), Easing::PowerInOut(1));
    assert_eq!("none".parse::<Easing>().unwrap(), Easing::Linear);
    assert_eq!("back.out(2)".parse::<Easing>().unwrap(), Easing::BackOut(2.0));
    assert_eq!(
        "elastic.out(1, 0.5)".parse::<Easing>().unwrap(),
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.5
        }
    );
    for bad in ["bounce.out", "power9", "power2.sideways", "back.out(x)"] {
        assert!(
            matches!(bad.parse::<Easing>(), Err(FxError::UnknownEasing(_))),
            "{}",
            bad
        );
    }
}

#[test]
fn pointer_channel_tracks_last_write() {
    let (writer, reader) = pointer_channel();
    assert_eq!(reader.position(), None);
    writer.set(10.0, 20.0);
    writer.set(30.0, 40.0);
    let other = writer.reader();
    assert_eq!(reader.position(), Some(Vec2::new(30.0, 40.0)));
    assert_eq!(other.position(), Some(Vec2::new(30.0, 40.0)));

    writer.set(f32::NAN, 0.0);
    assert_eq!(reader.get().pos, Vec2::new(30.0, 40.0));
    assert!(reader.get().seen);
}

#[test]
fn magnetic_pull_is_proportional() {
    let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(magnetic_offset(&rect, Vec2::new(200.0, 150.0)), Vec2::ZERO);
    let off = magnetic_offset(&rect, Vec2::new(300.0, 150.0));
    assert!((off.x - 30.0).abs() < 1e-4);
    assert_eq!(off.y, 0.0);
}

#[test]
fn tilt_leans_toward_pointer() {
    let rect = Rect::new(0.0, 0.0, 250.0, 250.0);
    assert_eq!(tilt_angles(&rect, Vec2::new(125.0, 125.0)), (0.0, 0.0));
    let (rx, ry) = tilt_angles(&rect, Vec2::new(250.0, 0.0));
    assert_eq!(rx, -5.0);
    assert_eq!(ry, -5.0);
}

#[test]
fn follower_approaches_target() {
    let mut f = Follower::default();
    let target = Vec2::new(100.0, 0.0);
    let first = f.step(target, 1.0 / 60.0);
    assert!((first.x - 8.0).abs() < 1e-3);
    for _ in 0..500 {
        f.step(target, 1.0 / 60.0);
    }
    assert!((f.pos.x - 100.0).abs() < 0.01);
}

#[test]
fn reading_progress_is_clamped() {
    assert_eq!(reading_progress(0.0, 3000.0, 1000.0), 0.0);
    assert_eq!(reading_progress(1000.0, 3000.0, 1000.0), 0.5);
    assert_eq!(reading_progress(5000.0, 3000.0, 1000.0), 1.0);
    assert_eq!(reading_progress(-20.0, 3000.0, 1000.0), 0.0);
    // Short pages cannot scroll.
    assert_eq!(reading_progress(0.0, 800.0, 1000.0), 0.0);
}

#[test]
fn parallax_moves_against_scroll() {
    assert_eq!(parallax_offset(200.0, PARALLAX_DEFAULT_SPEED), -100.0);
    assert_eq!(parallax_offset(0.0, 2.0), 0.0);
}

#[test]
fn header_hides_on_scroll_down_past_threshold() {
    let mut h = HeaderTracker::default();
    let u = h.update(40.0);
    assert!(!u.scrolled && !u.hidden);
    let u = h.update(120.0);
    assert!(u.scrolled && !u.hidden);
    let u = h.update(300.0);
    assert!(u.hidden && u.changed);
    let u = h.update(400.0);
    assert!(u.hidden && !u.changed);
    let u = h.update(350.0);
    assert!(!u.hidden && u.changed && u.scrolled);
}

#[test]
fn loader_progress_reaches_100() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut loader = LoaderProgress::default();
    let mut last = 0.0;
    let mut ticks = 0;
    while !loader.is_done() {
        let p = loader.step(&mut rng);
        assert!(p >= last && p - last <= LOADER_MAX_STEP);
        last = p;
        ticks += 1;
        assert!(ticks < 10_000);
    }
    assert_eq!(loader.percent(), 100.0);
}

#[test]
fn config_overrides_apply_and_ignore_garbage() {
    let mut c = FxConfig::default();
    c.apply_override("reveal-threshold", "0.25");
    c.apply_override("reveal-margin", "0px 0px -100px 0px");
    c.apply_override("particle-max", "20");
    c.apply_override("glitch-skip", "0.9");
    c.apply_override("ease", "back.out(1.2)");
    c.apply_override("stagger", "0.05");
    c.apply_override("particle-max", "-4");
    c.apply_override("reveal-margin", "nope");
    c.apply_override("ease", "wobble");
    c.apply_override("unknown", "1");

    assert_eq!(c.visibility.threshold, 0.25);
    assert_eq!(c.visibility.margin, Margin::bottom_px(-100.0));
    assert_eq!(c.particles.max_particles, 20);
    assert_eq!(c.glitch.skip_probability, 0.9);
    assert_eq!(c.timeline.default_easing, Easing::BackOut(1.2));
    assert_eq!(c.timeline.stagger_interval, 0.05);
}

#[test]
fn config_defaults_match_tuning_constants() {
    let c = FxConfig::default();
    assert_eq!(c.visibility.threshold, REVEAL_THRESHOLD);
    assert_eq!(c.visibility.margin, Margin::bottom_px(-50.0));
    assert_eq!(c.timeline.default_easing, Easing::PowerOut(2));
    assert_eq!(c.glitch.skip_probability, GLITCH_SKIP_PROBABILITY);
    assert_eq!(c.particles.max_particles, PARTICLE_MAX);

    let bad = FxConfig {
        timeline: TimelineConfig {
            stagger_interval: f64::NAN,
            ..TimelineConfig::default()
        },
        ..FxConfig::default()
    }
    .sanitized();
    assert_eq!(bad.timeline.stagger_interval, DEFAULT_STAGGER_SEC);
}

#[test]
fn rect_intersection_handles_edges() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert_eq!(a.intersect(&touching).map(|r| r.area()), Some(0.0));
    assert_eq!(a.intersect(&Rect::new(11.0, 0.0, 1.0, 1.0)), None);
    assert_eq!(a.coverage_by(&Rect::new(5.0, 0.0, 10.0, 10.0)), Some(0.5));
}
