// Host-side tests for inline style text.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/style.rs"]
mod style;

use fx_core::{Property, VisualState};
use style::*;

#[test]
fn identity_leaves_transform_to_the_stylesheet() {
    let state = VisualState::default();
    assert_eq!(transform_css(&state, 1000.0), None);
    assert_eq!(opacity_css(&state), None);
    assert_eq!(counter_text(&state), None);
}

#[test]
fn counter_is_whole_number_text_and_not_a_transform() {
    let mut state = VisualState::default();
    state.set(Property::Counter, 41.6);
    assert_eq!(counter_text(&state).as_deref(), Some("42"));
    assert_eq!(transform_css(&state, 1000.0), None);
    state.clear(Property::Counter);
    assert_eq!(counter_text(&state), None);
}

#[test]
fn translation_and_skew() {
    let mut state = VisualState::default();
    state.set(Property::X, 3.0);
    state.set(Property::SkewX, -8.0);
    assert_eq!(
        transform_css(&state, 1000.0).as_deref(),
        Some("translate3d(3px, 0px, 0px) skewX(-8deg)")
    );
}

#[test]
fn rotation_adds_perspective_first() {
    let mut state = VisualState::default();
    state.set(Property::RotateX, 4.0);
    state.set(Property::RotateY, -2.0);
    let css = transform_css(&state, 1000.0).unwrap();
    assert!(css.starts_with("perspective(1000px) "));
    assert!(css.ends_with("rotateY(-2deg) rotateX(4deg)"));
}

#[test]
fn scales_combine() {
    let mut state = VisualState::default();
    state.set(Property::Scale, 2.0);
    state.set(Property::ScaleX, 0.5);
    assert_eq!(transform_css(&state, 1000.0).as_deref(), Some("scale(1, 2)"));
}

#[test]
fn percent_offsets_precede_pixels() {
    let mut state = VisualState::default();
    state.set(Property::XPercent, -50.0);
    state.set(Property::Y, 10.0);
    assert_eq!(
        transform_css(&state, 1000.0).as_deref(),
        Some("translate(-50%, 0%) translate3d(0px, 10px, 0px)")
    );
}

#[test]
fn opacity_written_and_cleared() {
    let mut state = VisualState::default();
    state.set(Property::Opacity, 0.5);
    assert_eq!(opacity_css(&state).as_deref(), Some("0.5"));
    state.clear(Property::Opacity);
    assert_eq!(opacity_css(&state), None);
}

#[test]
fn loader_text_rounds_and_clamps() {
    assert_eq!(loader_css(42.6), ("42.6%".to_string(), "43%".to_string()));
    assert_eq!(loader_css(130.0), ("100%".to_string(), "100%".to_string()));
    assert_eq!(loader_css(-1.0).1, "0%");
}

#[test]
fn canvas_colours_clamp_alpha() {
    assert_eq!(rgba_css([0, 240, 255], 0.25), "rgba(0, 240, 255, 0.25)");
    assert_eq!(rgba_css([255, 42, 109], 3.0), "rgba(255, 42, 109, 1)");
}
