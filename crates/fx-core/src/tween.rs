//! Minimal tween primitive: interpolate a handful of properties of one
//! target over a duration with an easing curve.

use crate::easing::Easing;
use crate::target::{Property, StyleSink, TargetId};
use smallvec::SmallVec;

/// Property/value pairs carried by a tween. Most tweens touch one to four
/// properties.
pub type PropSet = SmallVec<[(Property, f32); 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenKind {
    /// Animate from the current values to the given ones.
    To,
    /// Animate from the given values back to the current ones.
    From,
    /// Write the given values at once.
    Set,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub kind: TweenKind,
    pub props: PropSet,
    pub duration: f64,
    pub easing: Easing,
    /// Reset the touched properties to defaults once the tween ends.
    pub clear_on_complete: bool,
}

impl TweenSpec {
    pub fn to(duration: f64) -> Self {
        Self::new(TweenKind::To, duration)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from(duration: f64) -> Self {
        Self::new(TweenKind::From, duration)
    }

    pub fn set() -> Self {
        Self::new(TweenKind::Set, 0.0)
    }

    fn new(kind: TweenKind, duration: f64) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            kind,
            props: PropSet::new(),
            duration,
            easing: Easing::default(),
            clear_on_complete: false,
        }
    }

    pub fn prop(mut self, prop: Property, value: f32) -> Self {
        match self.props.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.props.push((prop, value)),
        }
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn clear_on_complete(mut self) -> Self {
        self.clear_on_complete = true;
        self
    }

    /// Duration the tween occupies on a timeline.
    #[inline]
    pub fn span(&self) -> f64 {
        match self.kind {
            TweenKind::Set => 0.0,
            _ => self.duration,
        }
    }
}

/// A tween bound to a live target with captured endpoints.
#[derive(Clone, Debug)]
pub struct Tween {
    pub target: TargetId,
    from: PropSet,
    to: PropSet,
    duration: f64,
    easing: Easing,
    clear_on_complete: bool,
}

impl Tween {
    /// Capture start/end values from the sink. Returns `None` when the
    /// target is not attached.
    pub fn bind(target: TargetId, spec: &TweenSpec, sink: &dyn StyleSink) -> Option<Self> {
        if !sink.is_live(target) {
            return None;
        }
        let current: PropSet = spec
            .props
            .iter()
            .map(|(p, _)| (*p, sink.read(target, *p)))
            .collect();
        let (from, to) = match spec.kind {
            TweenKind::To | TweenKind::Set => (current, spec.props.clone()),
            TweenKind::From => (spec.props.clone(), current),
        };
        Some(Self {
            target,
            from,
            to,
            duration: spec.span(),
            easing: spec.easing,
            clear_on_complete: spec.clear_on_complete,
        })
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Progress in [0, 1] after `elapsed` seconds.
    #[inline]
    pub fn progress(&self, elapsed: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Write interpolated values for linear progress `t`. Endpoints are
    /// written exactly.
    pub fn render(&self, t: f32, sink: &mut dyn StyleSink) {
        let k = self.easing.apply(t);
        for ((prop, a), (_, b)) in self.from.iter().zip(self.to.iter()) {
            sink.write(self.target, *prop, a * (1.0 - k) + b * k);
        }
    }

    /// Render the end state and apply `clear_on_complete`.
    pub fn finish(&self, sink: &mut dyn StyleSink) {
        self.render(1.0, sink);
        if self.clear_on_complete {
            for (prop, _) in &self.to {
                sink.clear(self.target, *prop);
            }
        }
    }
}
