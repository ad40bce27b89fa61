//! Random quadrilaterals of a requested kind (replay tokens).
//!
//! Purpose
//! - Practice problems need fresh but reproducible shapes: the same
//!   `(seed, index)` always yields the same quadrilateral.
//!
//! Model
//! - Each kind draws its own builder parameters inside ranges that keep the
//!   shape away from neighbouring kinds (no near-square rectangles, no
//!   symmetric kites).
//! - A draw is accepted only if `classify` agrees with the requested kind;
//!   otherwise the same RNG stream draws again, up to `max_attempts`.
//!
//! Code cross-refs: `crate::quad::build_*`, `crate::quad::classify`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{require_finite, require_positive, GeomError, Result};
use crate::quad::{
    build_dart, build_from_offsets, build_kite, build_parallelogram, build_rectangle,
    build_rhombus, build_square, build_trapezoid, classify, Coord, Placement, Quad, QuadKind,
    DEFAULT_CENTER,
};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub const fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Independent stream per `(seed, index)`.
    fn to_std_rng(self) -> StdRng {
        let stream = splitmix64(self.index.wrapping_add(GOLDEN_GAMMA));
        StdRng::seed_from_u64(splitmix64(self.seed ^ stream))
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 output finalizer (Steele, Lea and Flood 2014).
const fn splitmix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Sampler configuration. `min_size..=max_size` bounds the main dimension
/// (side, base, width) in screen units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomQuadCfg {
    pub center: Coord,
    pub min_size: f64,
    pub max_size: f64,
    pub random_rotation: bool,
    pub max_attempts: u32,
}

impl Default for RandomQuadCfg {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            min_size: 80.0,
            max_size: 200.0,
            random_rotation: false,
            max_attempts: 64,
        }
    }
}

impl RandomQuadCfg {
    fn validate(&self) -> Result<()> {
        require_finite("center.x", self.center.x)?;
        require_finite("center.y", self.center.y)?;
        require_positive("min_size", self.min_size)?;
        require_positive("max_size", self.max_size)?;
        if self.min_size > self.max_size {
            return Err(GeomError::invalid(
                "min_size",
                format!("must not exceed max_size ({} > {})", self.min_size, self.max_size),
            ));
        }
        if self.max_attempts == 0 {
            return Err(GeomError::invalid("max_attempts", "must be >= 1"));
        }
        Ok(())
    }
}

#[inline]
fn frac<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Four vertices at jittered headings around the center, one per quadrant,
/// in screen-clockwise order starting top-left.
fn jittered_offsets<R: Rng>(rng: &mut R, size: f64) -> [(f64, f64); 4] {
    let mut out = [(0.0, 0.0); 4];
    for (k, slot) in out.iter_mut().enumerate() {
        let heading = (-135.0 + 90.0 * k as f64 + frac(rng, -25.0, 25.0)).to_radians();
        let r = size * 0.5 * frac(rng, 0.55, 1.0);
        *slot = (r * heading.cos(), r * heading.sin());
    }
    out
}

fn draw_once<R: Rng>(rng: &mut R, kind: QuadKind, size: f64, at: Placement) -> Result<Quad> {
    let (cx, cy, rot) = (at.center.x, at.center.y, at.rotation_deg);
    match kind {
        QuadKind::Square => build_square(size, cx, cy, rot),
        QuadKind::Rectangle => build_rectangle(size, size * frac(rng, 0.35, 0.85), cx, cy, rot),
        QuadKind::Rhombus => build_rhombus(size, frac(rng, 35.0, 80.0), at),
        QuadKind::Parallelogram => build_parallelogram(
            size,
            size * frac(rng, 0.4, 0.85),
            frac(rng, 40.0, 80.0),
            at,
        ),
        QuadKind::Trapezoid => build_trapezoid(
            size,
            size * frac(rng, 0.35, 0.75),
            size * frac(rng, 0.4, 0.8),
            size * frac(rng, -0.15, 0.15),
            at,
        ),
        QuadKind::Kite => build_kite(
            size,
            size * frac(rng, 0.2, 0.45),
            size * frac(rng, 0.6, 1.0),
            at,
        ),
        QuadKind::Concave => {
            let wing = size * frac(rng, 0.3, 0.5);
            build_dart(
                size,
                size * frac(rng, 0.4, 0.7),
                wing,
                wing * frac(rng, -0.2, 0.6),
                at,
            )
        }
        QuadKind::Generic => build_from_offsets(jittered_offsets(rng, size), at),
        QuadKind::Crossed => {
            let mut o = jittered_offsets(rng, size);
            o.swap(1, 2);
            build_from_offsets(o, at)
        }
    }
}

/// Draw a random quadrilateral that classifies as `kind`.
///
/// Errors on an invalid config, or with `SamplingFailed` when no draw in
/// `max_attempts` classifies as requested.
pub fn draw_quad(kind: QuadKind, cfg: RandomQuadCfg, tok: ReplayToken) -> Result<Quad> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    for attempt in 1..=cfg.max_attempts {
        let size = frac(&mut rng, cfg.min_size, cfg.max_size);
        let rotation = if cfg.random_rotation {
            frac(&mut rng, 0.0, 360.0)
        } else {
            0.0
        };
        let at = Placement {
            center: cfg.center,
            rotation_deg: rotation,
        };
        let q = draw_once(&mut rng, kind, size, at)?;
        let got = classify(&q);
        if got == kind {
            return Ok(q);
        }
        trace!(%kind, %got, attempt, "rejected draw");
    }
    Err(GeomError::SamplingFailed {
        kind: kind.as_str(),
        attempts: cfg.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::{is_convex, is_self_intersecting};

    #[test]
    fn same_token_same_quad() {
        let cfg = RandomQuadCfg {
            random_rotation: true,
            ..RandomQuadCfg::default()
        };
        let tok = ReplayToken::new(42, 7);
        for kind in QuadKind::ALL {
            let a = draw_quad(kind, cfg, tok).unwrap();
            let b = draw_quad(kind, cfg, tok).unwrap();
            assert_eq!(a, b);
        }
        let other = draw_quad(QuadKind::Generic, cfg, ReplayToken::new(42, 8)).unwrap();
        assert_ne!(other, draw_quad(QuadKind::Generic, cfg, tok).unwrap());
    }

    #[test]
    fn mixer_matches_reference_splitmix() {
        // first output of a SplitMix64 generator seeded with 0
        assert_eq!(splitmix64(GOLDEN_GAMMA), 0xe220_a839_7b1d_cdaf);
        assert_eq!(splitmix64(0), 0);
    }

    #[test]
    fn every_kind_classifies_as_requested() {
        let cfg = RandomQuadCfg {
            random_rotation: true,
            ..RandomQuadCfg::default()
        };
        for kind in QuadKind::ALL {
            for index in 0..20 {
                let q = draw_quad(kind, cfg, ReplayToken::new(2024, index)).unwrap();
                assert_eq!(classify(&q), kind);
                assert_eq!(is_self_intersecting(&q), kind == QuadKind::Crossed);
                if !matches!(kind, QuadKind::Crossed | QuadKind::Concave) {
                    assert!(is_convex(&q), "{kind} #{index}");
                }
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let tok = ReplayToken::new(1, 1);
        let bad = RandomQuadCfg {
            min_size: 300.0,
            ..RandomQuadCfg::default()
        };
        assert!(matches!(
            draw_quad(QuadKind::Square, bad, tok),
            Err(GeomError::InvalidParameter { name: "min_size", .. })
        ));
        let none = RandomQuadCfg {
            max_attempts: 0,
            ..RandomQuadCfg::default()
        };
        assert!(draw_quad(QuadKind::Square, none, tok).is_err());
    }
}
