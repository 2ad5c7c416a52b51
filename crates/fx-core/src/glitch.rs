//! Perpetual randomized glitch loop for the logo layers.
//!
//! ```text
//! Idle --start()--> Looping { next_wake_at } --stop(sink)/cancel--> Stopped
//!                      ^            |
//!                      +--wake()----+   (always reschedules)
//! ```
//!
//! The loop is polled from the host's frame loop rather than re-arming
//! timers recursively, so teardown is a flag check.

use crate::cancel::CancelToken;
use crate::constants::*;
use crate::target::{Property, StyleSink, TargetId};
use crate::timeline::{PlayState, Timeline};
use crate::tween::TweenSpec;
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchConfig {
    pub min_interval: f64,
    pub interval_range: f64,
    /// Probability that a wake emits nothing.
    pub skip_probability: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            min_interval: GLITCH_MIN_INTERVAL_SEC,
            interval_range: GLITCH_INTERVAL_RANGE_SEC,
            skip_probability: GLITCH_SKIP_PROBABILITY,
        }
    }
}

impl GlitchConfig {
    /// Clamp into a usable range; non-finite values fall back to defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            min_interval: pick(self.min_interval, d.min_interval).max(0.01),
            interval_range: pick(self.interval_range, d.interval_range).max(0.0),
            skip_probability: pick(self.skip_probability, d.skip_probability).clamp(0.0, 1.0),
        }
    }
}

/// The three logo layers a glitch can perturb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlitchTargets {
    pub main: TargetId,
    pub cyan: TargetId,
    pub pink: TargetId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlitchVariant {
    SkewPulse,
    ColorFlash,
    Jitter,
}

impl GlitchVariant {
    pub const ALL: [GlitchVariant; 3] = [
        GlitchVariant::SkewPulse,
        GlitchVariant::ColorFlash,
        GlitchVariant::Jitter,
    ];

    /// Build the short tween sequence for this variant.
    pub fn timeline<R: Rng>(self, targets: &GlitchTargets, rng: &mut R) -> Timeline {
        let spread = |rng: &mut R, span: f32| (rng.gen::<f32>() - 0.5) * span;
        let mut tl = Timeline::new(format!("glitch:{:?}", self));
        match self {
            GlitchVariant::SkewPulse => {
                let skew = GLITCH_BASE_SKEW_DEG + spread(rng, GLITCH_SKEW_SPREAD_DEG);
                tl.then(targets.main, TweenSpec::to(0.03).prop(Property::SkewX, skew))
                    .then(
                        targets.main,
                        TweenSpec::to(0.04).prop(Property::SkewX, GLITCH_BASE_SKEW_DEG),
                    );
            }
            GlitchVariant::ColorFlash => {
                let x = spread(rng, GLITCH_FLASH_SPREAD_PX);
                tl.then(
                    targets.pink,
                    TweenSpec::to(0.04)
                        .prop(Property::Opacity, GLITCH_FLASH_OPACITY)
                        .prop(Property::X, x),
                )
                .then(
                    targets.pink,
                    TweenSpec::to(0.05)
                        .prop(Property::Opacity, 0.0)
                        .prop(Property::X, 0.0),
                );
            }
            GlitchVariant::Jitter => {
                let x = spread(rng, GLITCH_JITTER_SPREAD_PX);
                tl.then(targets.cyan, TweenSpec::to(0.03).prop(Property::X, x))
                    .then(targets.cyan, TweenSpec::to(0.04).prop(Property::X, 0.0));
            }
        }
        tl
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlitchState {
    Idle,
    Looping { next_wake_at: f64 },
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeOutcome {
    Skipped,
    Emitted(GlitchVariant),
    /// The scheduler is idle or stopped; nothing happened.
    Inactive,
}

pub struct GlitchScheduler<R = StdRng> {
    config: GlitchConfig,
    targets: GlitchTargets,
    rng: R,
    state: GlitchState,
    cancel: CancelToken,
    current: Option<Timeline>,
    wakes: u64,
    emitted: u64,
}

impl<R: Rng> GlitchScheduler<R> {
    pub fn new(config: GlitchConfig, targets: GlitchTargets, rng: R) -> Self {
        Self {
            config: config.sanitized(),
            targets,
            rng,
            state: GlitchState::Idle,
            cancel: CancelToken::new(),
            current: None,
            wakes: 0,
            emitted: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> GlitchState {
        self.state
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    /// Handle a host can keep to stop the loop from anywhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// (wakes, emitted glitches) since start.
    pub fn counters(&self) -> (u64, u64) {
        (self.wakes, self.emitted)
    }

    /// Enter the loop. Only the first call from `Idle` has an effect; the
    /// first wake happens immediately.
    pub fn start(&mut self, now: f64) -> bool {
        if self.cancel.is_cancelled() || self.state != GlitchState::Idle {
            log::debug!("[glitch] start ignored in {:?}", self.state);
            return false;
        }
        log::info!("[glitch] loop started");
        self.state = GlitchState::Looping { next_wake_at: now };
        true
    }

    /// Idempotent. A glitch that is mid-flight jumps to its end so the
    /// layers are left at rest.
    pub fn stop(&mut self, sink: &mut dyn StyleSink) {
        self.halt();
        if let Some(mut tl) = self.current.take() {
            tl.finish(sink);
        }
    }

    fn halt(&mut self) {
        self.cancel.cancel();
        if self.state != GlitchState::Stopped {
            log::info!(
                "[glitch] stopped after {} wakes, {} glitches",
                self.wakes,
                self.emitted
            );
        }
        self.state = GlitchState::Stopped;
    }

    /// Random wait drawn from `[min_interval, min_interval + interval_range]`.
    pub fn next_interval(&mut self) -> f64 {
        self.config.min_interval + self.rng.gen::<f64>() * self.config.interval_range
    }

    /// Run one wake cycle at `now`: maybe emit a glitch, always reschedule.
    pub fn wake(&mut self, now: f64) -> WakeOutcome {
        if self.cancel.is_cancelled() {
            self.halt();
            return WakeOutcome::Inactive;
        }
        if !matches!(self.state, GlitchState::Looping { .. }) {
            return WakeOutcome::Inactive;
        }
        self.wakes += 1;
        let outcome = if self.rng.gen_bool(self.config.skip_probability) {
            WakeOutcome::Skipped
        } else {
            let variant = GlitchVariant::ALL[self.rng.gen_range(0..GlitchVariant::ALL.len())];
            self.current = Some(variant.timeline(&self.targets, &mut self.rng));
            self.emitted += 1;
            log::debug!("[glitch] emit {:?}", variant);
            WakeOutcome::Emitted(variant)
        };
        let next = now + self.next_interval();
        self.state = GlitchState::Looping { next_wake_at: next };
        outcome
    }

    /// Drive the loop from a frame callback. Returns the variant emitted on
    /// this poll, if any.
    pub fn poll(&mut self, now: f64, sink: &mut dyn StyleSink) -> Option<GlitchVariant> {
        if self.cancel.is_cancelled() {
            self.stop(sink);
            return None;
        }
        let mut emitted = None;
        if let GlitchState::Looping { next_wake_at } = self.state {
            if now >= next_wake_at {
                if let WakeOutcome::Emitted(v) = self.wake(now) {
                    emitted = Some(v);
                }
            }
        }
        if let Some(tl) = self.current.as_mut() {
            if tl.state() == PlayState::Idle {
                tl.play(now, sink);
            }
            if tl.advance(now, sink) {
                self.current = None;
            }
        }
        emitted
    }
}
