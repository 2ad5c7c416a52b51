//! Pointer-driven element effects: magnetic pull, 3D tilt and an eased
//! cursor follower.

use crate::constants::{FOLLOW_EASE, MAGNETIC_STRENGTH, TILT_DIVISOR};
use crate::geometry::Rect;
use crate::particles::frame_steps;
use glam::Vec2;

/// Offset that pulls an element toward the pointer, proportional to the
/// pointer's distance from the element centre.
#[inline]
pub fn magnetic_offset(rect: &Rect, pointer: Vec2) -> Vec2 {
    let centre = Vec2::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
    (pointer - centre) * MAGNETIC_STRENGTH
}

/// (rotateX, rotateY) in degrees for a card tilted toward the pointer.
#[inline]
pub fn tilt_angles(rect: &Rect, pointer: Vec2) -> (f32, f32) {
    let local = pointer - Vec2::new(rect.left, rect.top);
    let cx = rect.width / 2.0;
    let cy = rect.height / 2.0;
    ((local.y - cy) / TILT_DIVISOR, (cx - local.x) / TILT_DIVISOR)
}

/// Exponential follower used for the cursor glow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    pub pos: Vec2,
}

impl Follower {
    /// Approach `target` by `FOLLOW_EASE` per reference frame.
    pub fn step(&mut self, target: Vec2, dt: f32) -> Vec2 {
        let frames = frame_steps(dt);
        let k = 1.0 - (1.0 - FOLLOW_EASE).powf(frames);
        self.pos += (target - self.pos) * k;
        self.pos
    }
}
