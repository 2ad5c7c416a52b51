//! Background particle field with pointer attraction and a proximity graph.
//!
//! Velocities are expressed in units per reference frame (1/60 s). `tick`
//! converts the host's `dt` into frames and clamps it, so a long pause never
//! turns into one large integration step.
//!
//! Boundary handling reflects the velocity component toward the inside and
//! clamps the position onto the edge, so a fast particle cannot wander
//! outside between checks.

use crate::constants::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteColor {
    Cyan,
    Pink,
}

impl PaletteColor {
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        match self {
            PaletteColor::Cyan => PALETTE_CYAN,
            PaletteColor::Pink => PALETTE_PINK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: PaletteColor,
}

/// Simulation area; never smaller than `MIN_BOUND_EXTENT` on either axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| {
            if v.is_finite() {
                v.max(MIN_BOUND_EXTENT)
            } else {
                MIN_BOUND_EXTENT
            }
        };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub max_particles: usize,
    pub width_per_particle: f32,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub connection_radius: f32,
    pub connection_max_opacity: f32,
    pub line_width: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: PARTICLE_MAX,
            width_per_particle: PARTICLE_WIDTH_PER_PARTICLE,
            attraction_radius: ATTRACTION_RADIUS,
            attraction_strength: ATTRACTION_STRENGTH,
            connection_radius: CONNECTION_RADIUS,
            connection_max_opacity: CONNECTION_MAX_OPACITY,
            line_width: CONNECTION_LINE_WIDTH,
        }
    }
}

impl ParticleConfig {
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let pos = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            max_particles: self.max_particles,
            width_per_particle: pos(self.width_per_particle, d.width_per_particle),
            attraction_radius: pos(self.attraction_radius, d.attraction_radius),
            attraction_strength: if self.attraction_strength.is_finite() {
                self.attraction_strength.clamp(0.0, 1.0)
            } else {
                d.attraction_strength
            },
            connection_radius: pos(self.connection_radius, d.connection_radius),
            connection_max_opacity: if self.connection_max_opacity.is_finite() {
                self.connection_max_opacity.clamp(0.0, 1.0)
            } else {
                d.connection_max_opacity
            },
            line_width: pos(self.line_width, d.line_width),
        }
    }

    /// Particle count for a viewport width, capped at `max_particles`.
    pub fn count_for_width(&self, width: f32) -> usize {
        if !width.is_finite() || width <= 0.0 {
            return 0;
        }
        ((width / self.width_per_particle).floor() as usize).min(self.max_particles)
    }
}

/// Drawing seam for the host canvas.
pub trait Surface {
    fn clear(&mut self, bounds: Bounds);
    fn fill_circle(&mut self, center: Vec2, radius: f32, rgb: [u8; 3], alpha: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, rgb: [u8; 3], alpha: f32, width: f32);
}

/// An edge of the proximity graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

pub struct ParticleField<R = StdRng> {
    particles: Vec<Particle>,
    bounds: Bounds,
    config: ParticleConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(config: ParticleConfig, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            bounds: Bounds::new(MIN_BOUND_EXTENT, MIN_BOUND_EXTENT),
            config: config.sanitized(),
            rng,
        }
    }

    /// Seed `count` particles at random positions inside `bounds`.
    pub fn init(&mut self, count: usize, bounds: Bounds) {
        self.bounds = bounds;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                pos: Vec2::new(
                    rng.gen::<f32>() * bounds.width,
                    rng.gen::<f32>() * bounds.height,
                ),
                vel: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED_SPAN,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED_SPAN,
                ),
                radius: PARTICLE_SIZE_MIN + rng.gen::<f32>() * PARTICLE_SIZE_SPAN,
                opacity: PARTICLE_OPACITY_MIN + rng.gen::<f32>() * PARTICLE_OPACITY_SPAN,
                color: if rng.gen_bool(0.5) {
                    PaletteColor::Cyan
                } else {
                    PaletteColor::Pink
                },
            })
            .collect();
        log::info!(
            "[particles] init count={} bounds={:.0}x{:.0}",
            count,
            bounds.width,
            bounds.height
        );
    }

    /// Seed with the count derived from the bounds width.
    pub fn init_for_bounds(&mut self, bounds: Bounds) {
        let count = self.config.count_for_width(bounds.width);
        self.init(count, bounds);
    }

    /// New bounds take effect on the next tick's boundary check.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

impl<R> ParticleField<R> {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance one frame. `pointer` is `None` until the pointer has been seen.
    pub fn tick(&mut self, pointer: Option<Vec2>, dt: f32) {
        let frames = frame_steps(dt);
        if frames <= 0.0 {
            return;
        }
        let radius = self.config.attraction_radius;
        let strength = self.config.attraction_strength;
        let Bounds { width, height } = self.bounds;
        for p in &mut self.particles {
            p.pos += p.vel * frames;

            if let Some(target) = pointer {
                let d = target - p.pos;
                let dist = d.length();
                if dist < radius {
                    let force = (radius - dist) / radius * strength * frames;
                    p.pos += d * force.min(1.0);
                }
            }

            if p.pos.x < 0.0 {
                p.pos.x = 0.0;
                p.vel.x = p.vel.x.abs();
            } else if p.pos.x >= width {
                p.pos.x = width;
                p.vel.x = -p.vel.x.abs();
            }
            if p.pos.y < 0.0 {
                p.pos.y = 0.0;
                p.vel.y = p.vel.y.abs();
            } else if p.pos.y >= height {
                p.pos.y = height;
                p.vel.y = -p.vel.y.abs();
            }
        }
    }

    /// Pairs within the connection radius (inclusive), each reported once.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let r = self.config.connection_radius;
        let max = self.config.connection_max_opacity;
        let ps = &self.particles;
        (0..ps.len()).flat_map(move |a| {
            ((a + 1)..ps.len()).filter_map(move |b| {
                let distance = ps[a].pos.distance(ps[b].pos);
                (distance <= r).then(|| Connection {
                    a,
                    b,
                    distance,
                    opacity: max * (1.0 - distance / r).max(0.0),
                })
            })
        })
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.particles.is_empty() {
            return;
        }
        surface.clear(self.bounds);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color.rgb(), p.opacity);
        }
        for c in self.connections() {
            surface.stroke_line(
                self.particles[c.a].pos,
                self.particles[c.b].pos,
                PALETTE_CYAN,
                c.opacity,
                self.config.line_width,
            );
        }
    }
}

/// Convert seconds into reference frames, clamped to `MAX_FRAME_STEPS`.
#[inline]
pub fn frame_steps(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    (dt / REFERENCE_FRAME_SEC).min(MAX_FRAME_STEPS)
}
