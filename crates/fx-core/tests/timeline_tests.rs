// Host-side integration tests for the timeline composer and runner.

use fx_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn chained_offsets_resolve_to_pinned_start_times() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("chain");
    tl.tween(a, TweenSpec::to(0.3).prop(Property::X, 10.0), Offset::Absolute(0.0));
    tl.tween(a, TweenSpec::to(0.2).prop(Property::Y, 10.0), Offset::Relative(0.0));
    tl.tween(
        a,
        TweenSpec::to(0.4).prop(Property::Opacity, 0.0),
        Offset::Relative(-0.1),
    );

    // The overlap is measured from the end of the second step (0.5s).
    assert_eq!(tl.start_times(), vec![0.0, 0.3, 0.4]);
    assert_eq!(tl.duration(), 0.8);
}

#[test]
fn completion_fires_at_cursor_time_exactly_once() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let done = Rc::new(RefCell::new(Vec::new()));
    let mut tl = Timeline::new("complete");
    tl.tween(a, TweenSpec::to(0.3).prop(Property::X, 10.0), Offset::Absolute(0.0));
    tl.tween(a, TweenSpec::to(0.2).prop(Property::Y, 10.0), Offset::Relative(0.0));
    tl.tween(
        a,
        TweenSpec::to(0.4).prop(Property::Opacity, 0.0),
        Offset::Relative(-0.1),
    );
    let d = done.clone();
    tl.on_complete(move |at| d.borrow_mut().push(at));

    tl.play(10.0, &mut sink);
    assert!(!tl.advance(10.5, &mut sink));
    assert!(!tl.advance(10.79, &mut sink));
    assert!(tl.advance(10.8, &mut sink));
    assert!(tl.advance(11.5, &mut sink));
    assert!(tl.advance(20.0, &mut sink));

    let done = done.borrow();
    assert_eq!(done.len(), 1);
    assert!((done[0] - 10.8).abs() < 1e-9);
}

#[test]
fn completion_waits_for_long_step_that_ends_last() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let b = sink.spawn();
    let count = Rc::new(RefCell::new(0));
    let mut tl = Timeline::new("out-of-order");
    // First appended step ends last.
    tl.tween(a, TweenSpec::to(1.0).prop(Property::X, 1.0), Offset::Absolute(0.0));
    tl.tween(b, TweenSpec::to(0.1).prop(Property::X, 1.0), Offset::Absolute(0.2));
    let c = count.clone();
    tl.on_complete(move |_| *c.borrow_mut() += 1);

    tl.play(0.0, &mut sink);
    assert!(!tl.advance(0.5, &mut sink));
    assert!(approx(sink.state(b).x, 1.0));
    assert!(!tl.advance(0.9, &mut sink));
    for i in 0..10 {
        tl.advance(1.0 + i as f64 * 0.1, &mut sink);
    }
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn steps_run_in_start_order_with_ties_by_append_order() {
    let mut sink = MemorySink::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut tl = Timeline::new("order");
    for (name, at) in [("b", 0.5), ("a", 0.2), ("c", 0.5), ("d", 0.0)] {
        let l = log.clone();
        tl.call(move |_| l.borrow_mut().push(name), Offset::Absolute(at));
    }
    tl.play(0.0, &mut sink);
    tl.advance(1.0, &mut sink);
    assert_eq!(*log.borrow(), vec!["d", "a", "b", "c"]);
}

#[test]
fn callbacks_receive_scheduled_time_and_have_no_duration() {
    let mut sink = MemorySink::new();
    let seen = Rc::new(RefCell::new(None));
    let mut tl = Timeline::new("call");
    let a = sink.spawn();
    tl.then(a, TweenSpec::to(0.25).prop(Property::X, 4.0));
    let s = seen.clone();
    tl.call(move |at| *s.borrow_mut() = Some(at), Offset::Relative(0.5));
    assert_eq!(tl.duration(), 0.75);

    tl.play(2.0, &mut sink);
    tl.advance(2.5, &mut sink);
    assert_eq!(*seen.borrow(), None);
    tl.advance(2.8, &mut sink);
    assert_eq!(*seen.borrow(), Some(2.75));
}

#[test]
fn tween_interpolates_from_current_value() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    sink.write(a, Property::X, 10.0);
    let mut tl = Timeline::new("lerp");
    tl.then(
        a,
        TweenSpec::to(1.0).prop(Property::X, 20.0).ease(Easing::Linear),
    );
    tl.play(0.0, &mut sink);
    tl.advance(0.5, &mut sink);
    assert!(approx(sink.state(a).x, 15.0));
    tl.advance(1.0, &mut sink);
    assert!(approx(sink.state(a).x, 20.0));
}

#[test]
fn from_tween_renders_start_values_on_play() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("from");
    tl.tween(
        a,
        TweenSpec::from(0.4)
            .prop(Property::Opacity, 0.0)
            .prop(Property::Y, 15.0),
        Offset::Absolute(1.0),
    );
    tl.play(0.0, &mut sink);
    assert!(approx(sink.state(a).get(Property::Opacity), 0.0));
    assert!(approx(sink.state(a).y, 15.0));

    tl.advance(2.0, &mut sink);
    assert!(approx(sink.state(a).get(Property::Opacity), 1.0));
    assert!(approx(sink.state(a).y, 0.0));
}

#[test]
fn set_tween_applies_instantly() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("set");
    tl.then(a, TweenSpec::set().prop(Property::ScaleX, 0.0));
    assert_eq!(tl.duration(), 0.0);
    tl.play(0.0, &mut sink);
    assert!(tl.advance(0.0, &mut sink));
    assert!(approx(sink.state(a).scale_x, 0.0));
}

#[test]
fn clear_on_complete_resets_properties() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("clear");
    tl.then(
        a,
        TweenSpec::from(0.2)
            .prop(Property::Opacity, 0.0)
            .prop(Property::Y, 20.0)
            .clear_on_complete(),
    );
    tl.play(0.0, &mut sink);
    tl.advance(0.1, &mut sink);
    assert!(sink.state(a).opacity.is_some());
    tl.advance(0.3, &mut sink);
    assert_eq!(sink.state(a).opacity, None);
    assert!(sink.state(a).is_identity_transform());
}

#[test]
fn missing_target_is_skipped_and_rest_continues() {
    let mut sink = MemorySink::new();
    let live = sink.spawn();
    let gone = sink.dangling();
    let reached = Rc::new(RefCell::new(false));
    let mut tl = Timeline::new("skip");
    tl.then(gone, TweenSpec::to(0.2).prop(Property::X, 5.0));
    tl.then(live, TweenSpec::to(0.2).prop(Property::X, 5.0));
    let r = reached.clone();
    tl.call(move |_| *r.borrow_mut() = true, Offset::default());

    tl.play(0.0, &mut sink);
    tl.advance(0.1, &mut sink);
    assert!(approx(sink.state(live).x, 0.0));
    assert!(tl.advance(0.5, &mut sink));
    assert!(approx(sink.state(live).x, 5.0));
    assert_eq!(sink.state(gone), VisualState::default());
    assert!(*reached.borrow());
}

#[test]
fn stagger_expands_to_virtual_steps() {
    let mut sink = MemorySink::new();
    let targets: Vec<TargetId> = (0..3).map(|_| sink.spawn()).collect();
    let mut tl = Timeline::new("stagger");
    let spec = TweenSpec::to(0.4).prop(Property::Y, 0.0);
    let base = tl.stagger(&targets, &spec, 0.1, Offset::Absolute(0.0));
    assert_eq!(base, 0.0);
    assert_eq!(tl.start_times(), vec![0.0, 0.1, 0.2]);
    assert!((tl.duration() - 0.6).abs() < 1e-9);

    let empty = tl.stagger(&[], &spec, 0.1, Offset::Relative(0.0));
    assert!((empty - 0.6).abs() < 1e-9);
    assert_eq!(tl.len(), 3);
}

#[test]
fn negative_stagger_runs_group_in_reverse() {
    let mut sink = MemorySink::new();
    let targets: Vec<TargetId> = (0..3).map(|_| sink.spawn()).collect();
    let mut tl = Timeline::new("reverse");
    let spec = TweenSpec::to(0.4).prop(Property::Y, 0.0);
    tl.stagger(&targets, &spec, -0.1, Offset::Absolute(0.0));
    assert_eq!(tl.start_times(), vec![0.2, 0.1, 0.0]);
    assert!((tl.duration() - 0.6).abs() < 1e-9);

    // Only the last target has started after 0.05s.
    for t in &targets {
        sink.write(*t, Property::Y, 10.0);
    }
    tl.play(0.0, &mut sink);
    tl.advance(0.05, &mut sink);
    assert_eq!(sink.read(targets[0], Property::Y), 10.0);
    assert_eq!(sink.read(targets[1], Property::Y), 10.0);
    assert!(sink.read(targets[2], Property::Y) < 10.0);
}

#[test]
fn finish_jumps_to_end_state_and_completes_once() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let done = Rc::new(RefCell::new(0));
    let mut tl = Timeline::new("finish");
    tl.then(a, TweenSpec::to(0.3).prop(Property::X, 10.0))
        .then(a, TweenSpec::to(0.3).prop(Property::X, 0.0).prop(Property::Opacity, 0.5));
    let d = done.clone();
    tl.on_complete(move |_| *d.borrow_mut() += 1);

    tl.play(1.0, &mut sink);
    tl.advance(1.1, &mut sink);
    tl.finish(&mut sink);
    assert!(tl.is_complete());
    assert_eq!(sink.read(a, Property::X), 0.0);
    assert_eq!(sink.read(a, Property::Opacity), 0.5);

    tl.finish(&mut sink);
    assert!(tl.advance(5.0, &mut sink));
    assert_eq!(*done.borrow(), 1);
}

#[test]
fn nested_timeline_is_spliced_at_offset() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let child_done = Rc::new(RefCell::new(None));

    let mut child = Timeline::new("child");
    child.then(a, TweenSpec::to(0.3).prop(Property::X, 1.0));
    child.then(a, TweenSpec::to(0.3).prop(Property::X, 2.0));
    let cd = child_done.clone();
    child.on_complete(move |at| *cd.borrow_mut() = Some(at));

    let mut parent = Timeline::new("parent");
    parent.then(a, TweenSpec::to(0.5).prop(Property::Y, 1.0));
    parent.add(child, Offset::Relative(0.0));
    parent.tween(a, TweenSpec::to(0.2).prop(Property::Scale, 2.0), Offset::Relative(-1.0));

    let starts = parent.start_times();
    assert_eq!(starts.len(), 5);
    assert_eq!(starts[0], 0.0);
    assert_eq!(starts[1], 0.5);
    assert!((starts[2] - 0.8).abs() < 1e-9);
    assert!((starts[3] - 1.1).abs() < 1e-9);
    assert!((starts[4] - 0.1).abs() < 1e-9);
    assert!((parent.duration() - 1.1).abs() < 1e-9);

    parent.play(0.0, &mut sink);
    assert!(parent.advance(1.2, &mut sink));
    let done_at = (*child_done.borrow()).unwrap_or_default();
    assert!((done_at - 1.1).abs() < 1e-9);
    assert!(approx(sink.state(a).x, 2.0));
}

#[test]
fn relative_overlap_never_starts_before_zero() {
    let mut tl = Timeline::new("clamp");
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    tl.tween(a, TweenSpec::to(0.2).prop(Property::X, 1.0), Offset::Relative(-1.0));
    assert_eq!(tl.start_times(), vec![0.0]);
    assert_eq!(tl.duration(), 0.2);
}

#[test]
fn cursor_is_monotonic() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("monotonic");
    let mut last = 0.0;
    for (dur, off) in [(1.0, 0.0), (0.1, -0.9), (0.2, -0.5), (0.3, 0.1)] {
        tl.tween(a, TweenSpec::to(dur).prop(Property::X, 1.0), Offset::Relative(off));
        assert!(tl.duration() >= last);
        last = tl.duration();
    }
}

#[test]
fn large_frame_jump_completes_everything_in_order() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut tl = Timeline::new("jump");
    tl.then(a, TweenSpec::to(0.2).prop(Property::X, 3.0));
    tl.then(a, TweenSpec::to(0.2).prop(Property::X, 7.0));
    tl.play(0.0, &mut sink);
    assert!(tl.advance(100.0, &mut sink));
    assert!(approx(sink.state(a).x, 7.0));
}

#[test]
fn empty_timeline_completes_on_first_advance() {
    let mut sink = MemorySink::new();
    let mut tl = Timeline::new("empty");
    let hit = Rc::new(RefCell::new(0));
    let h = hit.clone();
    tl.on_complete(move |_| *h.borrow_mut() += 1);
    assert!(!tl.advance(0.0, &mut sink));
    tl.play(0.0, &mut sink);
    assert!(tl.advance(0.0, &mut sink));
    assert!(tl.advance(1.0, &mut sink));
    assert_eq!(*hit.borrow(), 1);
}

#[test]
fn kill_target_retires_unfinished_tweens() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let b = sink.spawn();
    let mut tl = Timeline::new("kill");
    tl.tween(a, TweenSpec::to(1.0).prop(Property::X, 10.0), Offset::Absolute(0.0));
    tl.tween(b, TweenSpec::to(1.0).prop(Property::X, 10.0), Offset::Absolute(0.0));
    tl.play(0.0, &mut sink);
    tl.advance(0.5, &mut sink);
    let frozen = sink.state(a).x;
    assert_eq!(tl.kill_target(a), 1);
    tl.advance(1.0, &mut sink);
    assert_eq!(sink.state(a).x, frozen);
    assert!(approx(sink.state(b).x, 10.0));
}

#[test]
fn offsets_parse_from_position_strings() {
    assert_eq!("+=0.5".parse::<Offset>().unwrap(), Offset::Relative(0.5));
    assert_eq!("-=1".parse::<Offset>().unwrap(), Offset::Relative(-1.0));
    assert_eq!("0.3".parse::<Offset>().unwrap(), Offset::Absolute(0.3));
    assert_eq!("".parse::<Offset>().unwrap(), Offset::Relative(0.0));
    assert!(matches!(
        "soon".parse::<Offset>(),
        Err(FxError::InvalidOffset(_))
    ));
}

#[test]
fn runner_starts_queued_timelines_and_drops_finished_ones() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut runner = TimelineRunner::new();
    let mut tl = Timeline::new("reveal");
    tl.then(a, TweenSpec::to(0.5).prop(Property::Y, 30.0));
    runner.enqueue(tl);
    assert!(!runner.is_idle());

    runner.advance(3.0, &mut sink);
    assert_eq!(runner.active_len(), 1);
    runner.advance(3.25, &mut sink);
    assert!(sink.state(a).y > 0.0 && sink.state(a).y < 30.0);
    runner.advance(3.5, &mut sink);
    assert!(runner.is_idle());
    assert!(approx(sink.state(a).y, 30.0));
}

#[test]
fn runner_overwrite_kills_previous_tweens_of_target() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let mut runner = TimelineRunner::new();

    let mut first = Timeline::new("first");
    first.then(a, TweenSpec::to(1.0).prop(Property::X, 100.0).ease(Easing::Linear));
    runner.enqueue(first);
    runner.advance(0.0, &mut sink);
    runner.advance(0.5, &mut sink);

    let mut second = Timeline::new("second");
    second.then(a, TweenSpec::to(0.1).prop(Property::X, 0.0));
    runner.enqueue_overwrite(second);
    runner.advance(0.5, &mut sink);
    runner.advance(0.7, &mut sink);
    assert!(approx(sink.state(a).x, 0.0));
    assert_eq!(runner.active_len(), 1);

    // The first timeline still waits out its own duration.
    runner.advance(1.1, &mut sink);
    assert!(approx(sink.state(a).x, 0.0));
    assert!(runner.is_idle());
}

#[test]
fn callbacks_can_queue_follow_up_timelines() {
    let mut sink = MemorySink::new();
    let a = sink.spawn();
    let b = sink.spawn();
    let mut runner = TimelineRunner::new();
    let queue = runner.queue();

    let mut first = Timeline::new("loader");
    first.then(a, TweenSpec::to(0.2).prop(Property::Opacity, 0.0));
    first.on_complete(move |_| {
        let mut next = Timeline::new("intro");
        next.then(b, TweenSpec::to(0.2).prop(Property::X, 9.0));
        queue.push(next);
    });
    runner.enqueue(first);

    runner.advance(0.0, &mut sink);
    runner.advance(0.2, &mut sink);
    // Follow-up is queued, not yet running.
    assert_eq!(runner.active_len(), 0);
    assert!(!runner.is_idle());

    runner.advance(0.3, &mut sink);
    runner.advance(0.5, &mut sink);
    assert!(approx(sink.state(b).x, 9.0));
    assert!(runner.is_idle());
}
