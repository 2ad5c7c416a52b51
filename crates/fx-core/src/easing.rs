//! Easing curves addressed by the identifiers used in page configuration
//! (`"power2.out"`, `"back.out(1.7)"`, `"elastic.out(1, 0.5)"`).

use crate::error::FxError;
use std::f32::consts::TAU;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// `powerN.in` — polynomial of degree N + 1.
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    /// `back.out(overshoot)`
    BackOut(f32),
    /// `elastic.out(amplitude, period)`
    ElasticOut { amplitude: f32, period: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::PowerOut(1)
    }
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress.
    ///
    /// Endpoints are exact: `apply(0) == 0` and `apply(1) == 1`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::Linear => t,
            Easing::PowerIn(n) => t.powi(degree(n)),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powi(degree(n)),
            Easing::PowerInOut(n) => {
                if t < 0.5 {
                    (2.0 * t).powi(degree(n)) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(degree(n)) / 2.0
                }
            }
            Easing::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Easing::ElasticOut { amplitude, period } => {
                let p1 = amplitude.max(1.0);
                let span = period.max(1e-3) / amplitude.clamp(1e-3, 1.0);
                let phase = span / TAU * (1.0 / p1).asin();
                let w = TAU / span;
                p1 * 2f32.powf(-10.0 * t) * ((t - phase) * w).sin() + 1.0
            }
        }
    }
}

#[inline]
fn degree(n: u8) -> i32 {
    n.clamp(1, 4) as i32 + 1
}

fn parse_args(s: &str, name: &str) -> Option<Vec<f32>> {
    let inner = s.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')?;
    inner
        .split(',')
        .map(|a| a.trim().parse::<f32>().ok())
        .collect()
}

impl FromStr for Easing {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        let unknown = || FxError::UnknownEasing(s.to_string());
        match id {
            "none" | "linear" => return Ok(Easing::Linear),
            "back.out" => return Ok(Easing::BackOut(1.7)),
            "elastic.out" => {
                return Ok(Easing::ElasticOut {
                    amplitude: 1.0,
                    period: 0.3,
                })
            }
            _ => {}
        }
        if let Some(args) = parse_args(id, "back.out") {
            return match args.as_slice() {
                [s] => Ok(Easing::BackOut(*s)),
                _ => Err(unknown()),
            };
        }
        if let Some(args) = parse_args(id, "elastic.out") {
            return match args.as_slice() {
                [a] => Ok(Easing::ElasticOut {
                    amplitude: *a,
                    period: 0.3,
                }),
                [a, p] => Ok(Easing::ElasticOut {
                    amplitude: *a,
                    period: *p,
                }),
                _ => Err(unknown()),
            };
        }
        let rest = id.strip_prefix("power").ok_or_else(unknown)?;
        let (n, mode) = rest.split_once('.').unwrap_or((rest, "out"));
        let n: u8 = n.parse().map_err(|_| unknown())?;
        if !(1..=4).contains(&n) {
            return Err(unknown());
        }
        match mode {
            "in" => Ok(Easing::PowerIn(n)),
            "out" => Ok(Easing::PowerOut(n)),
            "inOut" => Ok(Easing::PowerInOut(n)),
            _ => Err(unknown()),
        }
    }
}
