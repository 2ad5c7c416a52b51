//! Viewport and bounding-box math used by the visibility trigger.

use crate::error::FxError;
use std::str::FromStr;

/// Axis-aligned box in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two boxes, or `None` when they do not touch.
    ///
    /// Edge-adjacent boxes produce a zero-area intersection rather than `None`.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Fraction of `self` covered by `other`, in [0, 1].
    ///
    /// Returns `None` when the boxes do not intersect. Zero-area boxes that
    /// touch `other` count as fully covered.
    pub fn coverage_by(&self, other: &Rect) -> Option<f32> {
        let hit = self.intersect(other)?;
        let area = self.area();
        if area <= f32::EPSILON {
            return Some(1.0);
        }
        Some((hit.area() / area).clamp(0.0, 1.0))
    }
}

/// Host viewport size and scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Viewport box in client coordinates, grown (positive) or shrunk
    /// (negative) by `margin`.
    pub fn adjusted(&self, margin: &Margin) -> Rect {
        let w = self.width.max(0.0);
        let h = self.height.max(0.0);
        let top = margin.top.resolve(h);
        let right = margin.right.resolve(w);
        let bottom = margin.bottom.resolve(h);
        let left = margin.left.resolve(w);
        Rect::new(-left, -top, w + left + right, h + top + bottom)
    }
}

/// A single root-margin component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    #[inline]
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            Length::Px(v) => v,
            Length::Percent(p) => extent * p / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl FromStr for Length {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || FxError::InvalidMargin(s.to_string());
        if let Some(num) = s.strip_suffix("px") {
            num.trim().parse::<f32>().map(Length::Px).map_err(|_| bad())
        } else if let Some(num) = s.strip_suffix('%') {
            num.trim().parse::<f32>().map(Length::Percent).map_err(|_| bad())
        } else if s == "0" {
            Ok(Length::Px(0.0))
        } else {
            Err(bad())
        }
    }
}

/// Viewport edge adjustment, same order as CSS: top, right, bottom, left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Shrink the bottom edge by `px`.
    pub fn bottom_px(px: f32) -> Self {
        Self {
            bottom: Length::Px(px),
            ..Self::ZERO
        }
    }
}

impl FromStr for Margin {
    type Err = FxError;

    /// Accepts the 1 to 4 value CSS shorthand, e.g. `"0px 0px -50px 0px"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| FxError::InvalidMargin(s.to_string()))?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(FxError::InvalidMargin(s.to_string())),
        };
        Ok(Margin {
            top,
            right,
            bottom,
            left,
        })
    }
}
