//! Scroll-driven values recomputed by frame-scheduled handlers.

use crate::constants::*;
use rand::Rng;

/// Reading progress in [0, 1]. Pages that cannot scroll report 0.
#[inline]
pub fn reading_progress(scroll_top: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable < 1.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Vertical translation for a parallax layer.
#[inline]
pub fn parallax_offset(scroll_y: f32, speed: f32) -> f32 {
    -(scroll_y * speed)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderUpdate {
    /// Page scrolled past the compact-header threshold.
    pub scrolled: bool,
    /// Header should slide out of view.
    pub hidden: bool,
    /// `hidden` changed on this update.
    pub changed: bool,
}

/// Hides the header while scrolling down and shows it on scroll-up.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderTracker {
    last_scroll: f32,
    hidden: bool,
}

impl HeaderTracker {
    pub fn update(&mut self, scroll: f32) -> HeaderUpdate {
        let hidden = scroll > self.last_scroll && scroll > HEADER_HIDE_AFTER;
        let changed = hidden != self.hidden;
        self.hidden = hidden;
        self.last_scroll = scroll;
        HeaderUpdate {
            scrolled: scroll > HEADER_SCROLLED_AT,
            hidden,
            changed,
        }
    }
}

/// Simulated page-load progress shown by the loader.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoaderProgress {
    percent: f32,
}

impl LoaderProgress {
    #[inline]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.percent >= 100.0
    }

    /// Advance by a random step; returns the new percentage.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> f32 {
        self.percent = (self.percent + rng.gen::<f32>() * LOADER_MAX_STEP).min(100.0);
        self.percent
    }
}
