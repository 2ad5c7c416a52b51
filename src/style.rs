//! CSS text for engine visual states. Pure string building so it can be
//! tested on the host.

use fx_core::VisualState;
use std::fmt::Write;

/// Inline `transform` value for `state`, or `None` when the element is at
/// identity and the stylesheet should stay in charge.
pub fn transform_css(state: &VisualState, perspective_px: f32) -> Option<String> {
    if state.is_identity_transform() {
        return None;
    }
    let mut css = String::new();
    if state.rotate_x != 0.0 || state.rotate_y != 0.0 {
        _ = write!(css, "perspective({}px) ", perspective_px);
    }
    if state.x_percent != 0.0 || state.y_percent != 0.0 {
        _ = write!(css, "translate({}%, {}%) ", state.x_percent, state.y_percent);
    }
    if state.x != 0.0 || state.y != 0.0 {
        _ = write!(css, "translate3d({}px, {}px, 0px) ", state.x, state.y);
    }
    if state.rotate_y != 0.0 {
        _ = write!(css, "rotateY({}deg) ", state.rotate_y);
    }
    if state.rotate_x != 0.0 {
        _ = write!(css, "rotateX({}deg) ", state.rotate_x);
    }
    if state.skew_x != 0.0 {
        _ = write!(css, "skewX({}deg) ", state.skew_x);
    }
    let sx = state.scale * state.scale_x;
    let sy = state.scale * state.scale_y;
    if sx != 1.0 || sy != 1.0 {
        _ = write!(css, "scale({}, {}) ", sx, sy);
    }
    css.truncate(css.trim_end().len());
    Some(css)
}

/// Inline `opacity` value, `None` when never written or cleared.
#[inline]
pub fn opacity_css(state: &VisualState) -> Option<String> {
    state.opacity.map(|o| format!("{}", o))
}

/// Text of a counter element, `None` when never written.
#[inline]
pub fn counter_text(state: &VisualState) -> Option<String> {
    state.counter.map(|n| format!("{}", n as i64))
}

/// Loader bar width and label for a percent value.
pub fn loader_css(percent: f32) -> (String, String) {
    let p = percent.clamp(0.0, 100.0);
    (format!("{}%", p), format!("{}%", p.round() as u32))
}

/// Canvas colour string.
#[inline]
pub fn rgba_css(rgb: [u8; 3], alpha: f32) -> String {
    format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0))
}
