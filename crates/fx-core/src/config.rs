use crate::constants::{DEFAULT_EASING, DEFAULT_STAGGER_SEC};
use crate::easing::Easing;
use crate::glitch::GlitchConfig;
use crate::particles::ParticleConfig;
use crate::visibility::VisibilityConfig;

/// Timeline defaults an integrator may tune.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    pub stagger_interval: f64,
    pub default_easing: Easing,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            stagger_interval: DEFAULT_STAGGER_SEC,
            default_easing: DEFAULT_EASING.parse().unwrap_or_default(),
        }
    }
}

/// Every tunable of the engine in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FxConfig {
    pub visibility: VisibilityConfig,
    pub particles: ParticleConfig,
    pub glitch: GlitchConfig,
    pub timeline: TimelineConfig,
}

impl FxConfig {
    /// Clamp every field into a safe range so no NaN or division by zero can
    /// reach the simulation.
    pub fn sanitized(self) -> Self {
        let stagger = if self.timeline.stagger_interval.is_finite() {
            self.timeline.stagger_interval.max(0.0)
        } else {
            DEFAULT_STAGGER_SEC
        };
        Self {
            visibility: self.visibility.sanitized(),
            particles: self.particles.sanitized(),
            glitch: self.glitch.sanitized(),
            timeline: TimelineConfig {
                stagger_interval: stagger,
                ..self.timeline
            },
        }
    }

    /// Apply a single `key = value` override. Unknown keys and unparsable
    /// values are logged and ignored.
    pub fn apply_override(&mut self, key: &str, value: &str) {
        let value = value.trim();
        let num = value.parse::<f64>().ok();
        match (key, num) {
            ("reveal-threshold", Some(v)) => self.visibility.threshold = v as f32,
            ("reveal-margin", _) => match value.parse() {
                Ok(m) => self.visibility.margin = m,
                Err(e) => log::warn!("[config] {}", e),
            },
            ("particle-max", Some(v)) if v >= 0.0 => self.particles.max_particles = v as usize,
            ("particle-spacing", Some(v)) => self.particles.width_per_particle = v as f32,
            ("attraction-radius", Some(v)) => self.particles.attraction_radius = v as f32,
            ("attraction-strength", Some(v)) => self.particles.attraction_strength = v as f32,
            ("connection-radius", Some(v)) => self.particles.connection_radius = v as f32,
            ("glitch-min", Some(v)) => self.glitch.min_interval = v,
            ("glitch-range", Some(v)) => self.glitch.interval_range = v,
            ("glitch-skip", Some(v)) => self.glitch.skip_probability = v,
            ("stagger", Some(v)) => self.timeline.stagger_interval = v,
            ("ease", _) => match value.parse() {
                Ok(e) => self.timeline.default_easing = e,
                Err(e) => log::warn!("[config] {}", e),
            },
            _ => log::warn!("[config] ignoring {}={}", key, value),
        }
    }
}
