//! One-shot visibility trigger.
//!
//! Every entry fires at most once: the first time its target's box meets the
//! threshold against the margin-adjusted viewport. Fired entries leave
//! observation for good.

use crate::constants::{REVEAL_ROOT_MARGIN, REVEAL_SETTLE_DELAY_MS, REVEAL_THRESHOLD};
use crate::geometry::{Margin, Rect, Viewport};
use crate::target::TargetId;
use fnv::FnvHashSet;
use std::fmt;

/// Host-provided layout queries.
pub trait GeometrySource {
    fn viewport(&self) -> Viewport;
    /// Bounding box in client coordinates, `None` if the element is gone.
    fn bounds(&self, target: TargetId) -> Option<Rect>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityConfig {
    pub threshold: f32,
    pub margin: Margin,
    pub settle_delay_ms: u32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            margin: REVEAL_ROOT_MARGIN.parse().unwrap_or(Margin::bottom_px(-50.0)),
            settle_delay_ms: REVEAL_SETTLE_DELAY_MS,
        }
    }
}

impl VisibilityConfig {
    pub fn sanitized(self) -> Self {
        Self {
            threshold: sanitize_threshold(self.threshold),
            ..self
        }
    }
}

#[inline]
fn sanitize_threshold(t: f32) -> f32 {
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        REVEAL_THRESHOLD
    }
}

pub type EnterCallback = Box<dyn FnOnce(TargetId)>;

pub struct TriggerEntry {
    pub target: TargetId,
    pub threshold: f32,
    pub margin: Margin,
    pub fired: bool,
    on_enter: Option<EnterCallback>,
}

impl fmt::Debug for TriggerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerEntry")
            .field("target", &self.target)
            .field("threshold", &self.threshold)
            .field("margin", &self.margin)
            .field("fired", &self.fired)
            .finish()
    }
}

impl TriggerEntry {
    pub fn new(
        target: TargetId,
        config: &VisibilityConfig,
        on_enter: impl FnOnce(TargetId) + 'static,
    ) -> Self {
        Self {
            target,
            threshold: sanitize_threshold(config.threshold),
            margin: config.margin,
            fired: false,
            on_enter: Some(Box::new(on_enter)),
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = sanitize_threshold(threshold);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    fn fire(&mut self) {
        self.fired = true;
        if let Some(cb) = self.on_enter.take() {
            cb(self.target);
        }
    }
}

/// Whether `bounds` counts as visible against the margin-adjusted viewport.
pub fn is_visible(bounds: &Rect, viewport: &Viewport, threshold: f32, margin: &Margin) -> bool {
    let root = viewport.adjusted(margin);
    match bounds.coverage_by(&root) {
        Some(fraction) => fraction >= threshold,
        None => false,
    }
}

#[derive(Debug, Default)]
pub struct VisibilityTrigger {
    entries: Vec<TriggerEntry>,
    fired: FnvHashSet<TargetId>,
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing. Targets already pending or already fired are
    /// ignored. Returns how many entries were accepted.
    pub fn register(&mut self, entries: impl IntoIterator<Item = TriggerEntry>) -> usize {
        let mut accepted = 0;
        for entry in entries {
            let known = self.fired.contains(&entry.target)
                || self.entries.iter().any(|e| e.target == entry.target);
            if known || entry.fired {
                log::debug!("[reveal] ignoring duplicate target {:?}", entry.target);
                continue;
            }
            self.entries.push(entry);
            accepted += 1;
        }
        accepted
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn pending_targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.entries.iter().map(|e| e.target)
    }

    pub fn has_fired(&self, target: TargetId) -> bool {
        self.fired.contains(&target)
    }

    /// Fire every entry that currently meets its threshold. Entries whose
    /// target has disappeared are dropped. Returns the targets fired now.
    pub fn check_and_fire(&mut self, geometry: &dyn GeometrySource) -> Vec<TargetId> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        let viewport = geometry.viewport();
        let mut ready = Vec::new();
        let mut keep = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            match geometry.bounds(entry.target) {
                None => log::debug!("[reveal] target {:?} gone, unobserving", entry.target),
                Some(b) if is_visible(&b, &viewport, entry.threshold, &entry.margin) => {
                    ready.push(entry)
                }
                Some(_) => keep.push(entry),
            }
        }
        self.entries = keep;
        self.fire(ready)
    }

    /// Degraded mode when visibility cannot be detected: everything is
    /// treated as visible.
    pub fn fire_all(&mut self) -> Vec<TargetId> {
        let all: Vec<TriggerEntry> = self.entries.drain(..).collect();
        if !all.is_empty() {
            log::warn!("[reveal] visibility detection unavailable, revealing {} targets", all.len());
        }
        self.fire(all)
    }

    fn fire(&mut self, entries: Vec<TriggerEntry>) -> Vec<TargetId> {
        let mut out = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if !self.fired.insert(entry.target) {
                continue;
            }
            entry.fire();
            out.push(entry.target);
        }
        out
    }
}
