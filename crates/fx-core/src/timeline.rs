//! Timeline composer.
//!
//! Steps are resolved to absolute start times when they are appended:
//!
//! - `Offset::Absolute(t)` starts at `t`.
//! - `Offset::Relative(o)` starts at `cursor + o`; a negative `o` overlaps the
//!   previous step.
//!
//! After each append the cursor becomes `max(cursor, start + duration)`, so it
//! never moves backwards. Playback runs steps in (start, append order) order
//! and fires the completion hook exactly once, when the cursor time has been
//! reached and every step has finished or been skipped.

use crate::error::FxError;
use crate::target::{StyleSink, TargetId};
use crate::tween::{Tween, TweenKind, TweenSpec};
use std::fmt;
use std::str::FromStr;

/// Side-effecting hook run at a step's instant. Receives the scheduled
/// host time of the step.
pub type Callback = Box<dyn FnMut(f64)>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    Absolute(f64),
    /// Relative to the current end of the timeline.
    Relative(f64),
}

impl Default for Offset {
    fn default() -> Self {
        Offset::Relative(0.0)
    }
}

impl FromStr for Offset {
    type Err = FxError;

    /// `"+=0.5"`, `"-=1"` are relative; a bare number is absolute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let bad = || FxError::InvalidOffset(s.to_string());
        if t.is_empty() {
            return Ok(Offset::default());
        }
        if let Some(v) = t.strip_prefix("+=") {
            return v.trim().parse().map(Offset::Relative).map_err(|_| bad());
        }
        if let Some(v) = t.strip_prefix("-=") {
            return v
                .trim()
                .parse::<f64>()
                .map(|v| Offset::Relative(-v))
                .map_err(|_| bad());
        }
        t.parse().map(Offset::Absolute).map_err(|_| bad())
    }
}

pub enum StepOp {
    Tween { target: TargetId, spec: TweenSpec },
    Call(Callback),
}

impl fmt::Debug for StepOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOp::Tween { target, spec } => f
                .debug_struct("Tween")
                .field("target", target)
                .field("spec", spec)
                .finish(),
            StepOp::Call(_) => f.write_str("Call"),
        }
    }
}

#[derive(Debug)]
pub struct Step {
    pub op: StepOp,
    pub offset: Offset,
}

impl Step {
    #[inline]
    fn span(&self) -> f64 {
        match &self.op {
            StepOp::Tween { spec, .. } => spec.span(),
            StepOp::Call(_) => 0.0,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Pending,
    Running(Tween),
    Done,
}

#[derive(Debug)]
struct Scheduled {
    start: f64,
    seq: usize,
    op: StepOp,
    phase: Phase,
    // From-tweens bound and rendered at play time.
    primed: Option<Tween>,
}

impl Scheduled {
    fn begin(&mut self, started_at: f64, sink: &dyn StyleSink, timeline: &str) -> Phase {
        match &mut self.op {
            StepOp::Tween { target, spec } => {
                match self.primed.take().or_else(|| Tween::bind(*target, spec, sink)) {
                    Some(tween) => Phase::Running(tween),
                    None => {
                        log::warn!(
                            "[timeline] {}: target {:?} missing, skipping step at {:.3}s",
                            timeline,
                            target,
                            self.start
                        );
                        Phase::Done
                    }
                }
            }
            StepOp::Call(cb) => {
                cb(started_at + self.start);
                Phase::Done
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayState {
    Idle,
    Playing { started_at: f64 },
    Complete,
}

pub struct Timeline {
    name: String,
    steps: Vec<Scheduled>,
    cursor: f64,
    next_seq: usize,
    on_complete: Option<Callback>,
    state: PlayState,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("name", &self.name)
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .finish()
    }
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            cursor: 0.0,
            next_seq: 0,
            on_complete: None,
            state: PlayState::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current end time of the timeline.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.cursor
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == PlayState::Complete
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolved start times in append order.
    pub fn start_times(&self) -> Vec<f64> {
        let mut by_seq: Vec<(usize, f64)> = self.steps.iter().map(|s| (s.seq, s.start)).collect();
        by_seq.sort_by_key(|(seq, _)| *seq);
        by_seq.into_iter().map(|(_, start)| start).collect()
    }

    /// Targets touched by tween steps, in append order, with repeats.
    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.steps.iter().filter_map(|s| match &s.op {
            StepOp::Tween { target, .. } => Some(*target),
            StepOp::Call(_) => None,
        })
    }

    fn resolve(&self, offset: Offset) -> f64 {
        let start = match offset {
            Offset::Absolute(t) if t.is_finite() => t,
            Offset::Relative(o) if o.is_finite() => self.cursor + o,
            _ => self.cursor,
        };
        start.max(0.0)
    }

    fn push(&mut self, start: f64, op: StepOp) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.steps.push(Scheduled {
            start,
            seq,
            op,
            phase: Phase::Pending,
            primed: None,
        });
    }

    /// Append a step and return its resolved start time.
    pub fn append(&mut self, step: Step) -> f64 {
        let start = self.resolve(step.offset);
        let end = start + step.span();
        self.push(start, step.op);
        self.cursor = self.cursor.max(end);
        start
    }

    pub fn tween(&mut self, target: TargetId, spec: TweenSpec, offset: Offset) -> &mut Self {
        self.append(Step {
            op: StepOp::Tween { target, spec },
            offset,
        });
        self
    }

    /// Append a tween directly after the previous end.
    pub fn then(&mut self, target: TargetId, spec: TweenSpec) -> &mut Self {
        self.tween(target, spec, Offset::default())
    }

    pub fn call(&mut self, cb: impl FnMut(f64) + 'static, offset: Offset) -> &mut Self {
        self.append(Step {
            op: StepOp::Call(Box::new(cb)),
            offset,
        });
        self
    }

    /// Apply `spec` to every target, the i-th starting `i * interval` after
    /// the resolved base. A negative interval runs the group from the last
    /// target back to the first. Returns the base start.
    pub fn stagger(
        &mut self,
        targets: &[TargetId],
        spec: &TweenSpec,
        interval: f64,
        offset: Offset,
    ) -> f64 {
        let base = self.resolve(offset);
        let interval = if interval.is_finite() { interval } else { 0.0 };
        let last = targets.len().saturating_sub(1);
        let mut end = self.cursor;
        for (i, target) in targets.iter().enumerate() {
            let order = if interval < 0.0 { last - i } else { i };
            let start = base + order as f64 * interval.abs();
            self.push(
                start,
                StepOp::Tween {
                    target: *target,
                    spec: spec.clone(),
                },
            );
            end = end.max(start + spec.span());
        }
        if targets.is_empty() {
            log::debug!("[timeline] {}: empty stagger group", self.name);
        }
        self.cursor = end;
        base
    }

    /// Splice `child` in at the resolved offset. Its completion hook becomes a
    /// callback step at the child's end.
    pub fn add(&mut self, mut child: Timeline, offset: Offset) -> f64 {
        let base = self.resolve(offset);
        child.steps.sort_by_key(|s| s.seq);
        for step in child.steps.drain(..) {
            self.push(base + step.start, step.op);
        }
        let child_end = base + child.cursor;
        if let Some(cb) = child.on_complete.take() {
            self.push(child_end, StepOp::Call(cb));
        }
        self.cursor = self.cursor.max(child_end);
        base
    }

    pub fn on_complete(&mut self, cb: impl FnMut(f64) + 'static) -> &mut Self {
        self.on_complete = Some(Box::new(cb));
        self
    }

    /// Begin playback at host time `now`. From-tweens render their start
    /// values immediately. Ignored unless the timeline is idle.
    pub fn play(&mut self, now: f64, sink: &mut dyn StyleSink) {
        if self.state != PlayState::Idle {
            log::debug!("[timeline] {}: play ignored in {:?}", self.name, self.state);
            return;
        }
        self.steps
            .sort_by(|a, b| a.start.total_cmp(&b.start).then(a.seq.cmp(&b.seq)));
        for step in &mut self.steps {
            if let StepOp::Tween { target, spec } = &step.op {
                if spec.kind == TweenKind::From {
                    step.primed = Tween::bind(*target, spec, sink);
                    if let Some(tween) = &step.primed {
                        tween.render(0.0, sink);
                    }
                }
            }
        }
        log::debug!(
            "[timeline] {}: play {} steps, duration {:.3}s",
            self.name,
            self.steps.len(),
            self.cursor
        );
        self.state = PlayState::Playing { started_at: now };
    }

    /// Advance to host time `now`. Returns true once the timeline has
    /// completed.
    pub fn advance(&mut self, now: f64, sink: &mut dyn StyleSink) -> bool {
        let started_at = match self.state {
            PlayState::Playing { started_at } => started_at,
            PlayState::Complete => return true,
            PlayState::Idle => return false,
        };
        let elapsed = (now - started_at).max(0.0);
        let mut all_done = true;
        for step in self.steps.iter_mut() {
            if step.start > elapsed {
                all_done = false;
                break;
            }
            if matches!(step.phase, Phase::Pending) {
                step.phase = step.begin(started_at, sink, &self.name);
            }
            let finished = match &step.phase {
                Phase::Running(tween) => {
                    let local = elapsed - step.start;
                    if local >= tween.duration() {
                        tween.finish(sink);
                        true
                    } else {
                        tween.render(tween.progress(local), sink);
                        false
                    }
                }
                _ => false,
            };
            if finished {
                step.phase = Phase::Done;
            }
            if !matches!(step.phase, Phase::Done) {
                all_done = false;
            }
        }
        if all_done && elapsed >= self.cursor {
            self.state = PlayState::Complete;
            log::debug!("[timeline] {}: complete", self.name);
            if let Some(mut cb) = self.on_complete.take() {
                cb(started_at + self.cursor);
            }
            return true;
        }
        false
    }

    /// Jump to the end: remaining steps render their final values, pending
    /// calls run and the completion hook fires. An idle timeline is played
    /// first.
    pub fn finish(&mut self, sink: &mut dyn StyleSink) {
        match self.state {
            PlayState::Complete => return,
            PlayState::Idle => self.play(0.0, sink),
            PlayState::Playing { .. } => {}
        }
        self.advance(f64::INFINITY, sink);
    }

    /// Retire every unfinished tween of `target`. Returns how many were
    /// removed.
    pub fn kill_target(&mut self, target: TargetId) -> usize {
        let mut killed = 0;
        for step in &mut self.steps {
            let hit = matches!(&step.op, StepOp::Tween { target: t, .. } if *t == target);
            if hit && !matches!(step.phase, Phase::Done) {
                step.phase = Phase::Done;
                step.primed = None;
                killed += 1;
            }
        }
        killed
    }
}
