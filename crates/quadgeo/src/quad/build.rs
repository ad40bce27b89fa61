//! Shape builders.
//!
//! Conventions
//! - Screen space, y grows downward.
//! - Vertices start at the top-left corner and run top-right, bottom-right,
//!   bottom-left (clockwise on screen, positive `signed_area`).
//! - `rotation_deg > 0` rotates clockwise on screen about the center.
//! - Builders assign the default labels "A".."D".
//!
//! Every public builder validates its parameters and fails with
//! `GeomError::InvalidParameter` instead of clamping.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use super::kind::QuadKind;
use super::types::{Coord, Quad};
use crate::error::{require_finite, require_positive, GeomError, Result};

/// Default canvas center used by `build_from_kind`.
pub const DEFAULT_CENTER: Coord = Coord::new(200.0, 150.0);

/// Center and rotation shared by all builders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Placement {
    pub center: Coord,
    pub rotation_deg: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            rotation_deg: 0.0,
        }
    }
}

impl Placement {
    pub fn new(cx: f64, cy: f64, rotation_deg: f64) -> Self {
        Self {
            center: Coord::new(cx, cy),
            rotation_deg,
        }
    }

    fn validate(&self) -> Result<()> {
        require_finite("center.x", self.center.x)?;
        require_finite("center.y", self.center.y)?;
        require_finite("rotation_deg", self.rotation_deg)?;
        Ok(())
    }

    /// Rotate offsets (relative to the center) and translate.
    fn place(&self, offsets: [Vector2<f64>; 4]) -> Quad {
        let rot = Rotation2::new(self.rotation_deg.to_radians());
        let c = self.center.vec();
        Quad::from_coords(offsets.map(|o| {
            let p = c + rot * o;
            (p.x, p.y)
        }))
        .with_default_labels()
    }
}

fn rect_offsets(w: f64, h: f64) -> [Vector2<f64>; 4] {
    let (hw, hh) = (w * 0.5, h * 0.5);
    [
        Vector2::new(-hw, -hh),
        Vector2::new(hw, -hh),
        Vector2::new(hw, hh),
        Vector2::new(-hw, hh),
    ]
}

/// Parallelogram with `base` along +x and the v0 angle `angle_deg` opening
/// downward; offsets are relative to the vertex average.
fn parallelogram_offsets(base: f64, side: f64, angle_deg: f64) -> [Vector2<f64>; 4] {
    let t = angle_deg.to_radians();
    let slant = Vector2::new(side * t.cos(), side * t.sin());
    let pts = [
        Vector2::zeros(),
        Vector2::new(base, 0.0),
        Vector2::new(base, 0.0) + slant,
        slant,
    ];
    recenter(pts)
}

fn trapezoid_offsets(bottom: f64, top: f64, height: f64, offset: f64) -> [Vector2<f64>; 4] {
    let hh = height * 0.5;
    [
        Vector2::new(-top * 0.5 + offset, -hh),
        Vector2::new(top * 0.5 + offset, -hh),
        Vector2::new(bottom * 0.5, hh),
        Vector2::new(-bottom * 0.5, hh),
    ]
}

/// Kite with its axis vertical; the center is the diagonal crossing.
fn kite_offsets(width: f64, top: f64, bottom: f64) -> [Vector2<f64>; 4] {
    [
        Vector2::new(0.0, -top),
        Vector2::new(width * 0.5, 0.0),
        Vector2::new(0.0, bottom),
        Vector2::new(-width * 0.5, 0.0),
    ]
}

fn recenter(pts: [Vector2<f64>; 4]) -> [Vector2<f64>; 4] {
    let c = pts.iter().fold(Vector2::zeros(), |acc, p| acc + p) / 4.0;
    pts.map(|p| p - c)
}

pub fn build_square(side: f64, cx: f64, cy: f64, rotation_deg: f64) -> Result<Quad> {
    require_positive("side", side)?;
    let at = Placement::new(cx, cy, rotation_deg);
    at.validate()?;
    Ok(at.place(rect_offsets(side, side)))
}

pub fn build_rectangle(
    width: f64,
    height: f64,
    cx: f64,
    cy: f64,
    rotation_deg: f64,
) -> Result<Quad> {
    require_positive("width", width)?;
    require_positive("height", height)?;
    let at = Placement::new(cx, cy, rotation_deg);
    at.validate()?;
    Ok(at.place(rect_offsets(width, height)))
}

/// Rhombus with interior angle `angle_deg` at v0 (strictly between 0 and 180).
pub fn build_rhombus(side: f64, angle_deg: f64, at: Placement) -> Result<Quad> {
    build_parallelogram(side, side, angle_deg, at)
}

/// Parallelogram: `base` = |v0v1|, `side` = |v1v2|, `angle_deg` at v0.
pub fn build_parallelogram(base: f64, side: f64, angle_deg: f64, at: Placement) -> Result<Quad> {
    require_positive("base", base)?;
    require_positive("side", side)?;
    require_angle("angle_deg", angle_deg)?;
    at.validate()?;
    Ok(at.place(parallelogram_offsets(base, side, angle_deg)))
}

/// Trapezoid with horizontal bases; `offset` shifts the top base along x.
/// Equal bases yield a parallelogram, which is accepted.
pub fn build_trapezoid(
    bottom: f64,
    top: f64,
    height: f64,
    offset: f64,
    at: Placement,
) -> Result<Quad> {
    require_positive("bottom", bottom)?;
    require_positive("top", top)?;
    require_positive("height", height)?;
    require_finite("offset", offset)?;
    at.validate()?;
    Ok(at.place(trapezoid_offsets(bottom, top, height, offset)))
}

/// Kite from its cross-bar `width` and the distances from the cross-bar to the
/// top and bottom tips. Equal distances yield a rhombus, which is accepted.
pub fn build_kite(width: f64, top: f64, bottom: f64, at: Placement) -> Result<Quad> {
    require_positive("width", width)?;
    require_positive("top", top)?;
    require_positive("bottom", bottom)?;
    at.validate()?;
    Ok(at.place(kite_offsets(width, top, bottom)))
}

/// Arrowhead ("dart") with the reflex vertex at v2: tip at `-tip` above the
/// center, wings at `(±width/2, wing)`, notch at `(0, notch)` with
/// `notch < wing`.
pub fn build_dart(width: f64, tip: f64, wing: f64, notch: f64, at: Placement) -> Result<Quad> {
    require_positive("width", width)?;
    require_positive("tip", tip)?;
    require_finite("wing", wing)?;
    require_finite("notch", notch)?;
    if notch <= -tip || notch >= wing {
        return Err(GeomError::invalid(
            "notch",
            format!("must lie strictly between {} and {wing}, got {notch}", -tip),
        ));
    }
    at.validate()?;
    Ok(at.place([
        Vector2::new(0.0, -tip),
        Vector2::new(width * 0.5, wing),
        Vector2::new(0.0, notch),
        Vector2::new(-width * 0.5, wing),
    ]))
}

/// Arbitrary vertices given as offsets from the placement center, rotated
/// with it. No shape constraints beyond finite input.
pub fn build_from_offsets(offsets: [(f64, f64); 4], at: Placement) -> Result<Quad> {
    for (x, y) in offsets {
        require_finite("offset.x", x)?;
        require_finite("offset.y", y)?;
    }
    at.validate()?;
    Ok(at.place(offsets.map(|(x, y)| Vector2::new(x, y))))
}

fn require_angle(name: &'static str, deg: f64) -> Result<f64> {
    require_finite(name, deg)?;
    if deg <= 0.0 || deg >= 180.0 {
        return Err(GeomError::invalid(
            name,
            format!("must be strictly between 0 and 180, got {deg}"),
        ));
    }
    Ok(deg)
}

/// Canonical, reasonably proportioned instance of each kind, centered at
/// `DEFAULT_CENTER` with no rotation.
pub fn build_from_kind(kind: QuadKind) -> Quad {
    let at = Placement::default();
    let offsets = match kind {
        QuadKind::Square => rect_offsets(120.0, 120.0),
        QuadKind::Rectangle => rect_offsets(180.0, 110.0),
        QuadKind::Rhombus => parallelogram_offsets(110.0, 110.0, 60.0),
        QuadKind::Parallelogram => parallelogram_offsets(160.0, 100.0, 60.0),
        QuadKind::Trapezoid => trapezoid_offsets(200.0, 110.0, 100.0, 0.0),
        QuadKind::Kite => kite_offsets(140.0, 50.0, 110.0),
        QuadKind::Concave => [
            Vector2::new(0.0, -90.0),
            Vector2::new(70.0, 60.0),
            Vector2::new(0.0, 10.0),
            Vector2::new(-70.0, 60.0),
        ],
        QuadKind::Generic => [
            Vector2::new(-80.0, -50.0),
            Vector2::new(90.0, -70.0),
            Vector2::new(70.0, 60.0),
            Vector2::new(-60.0, 50.0),
        ],
        QuadKind::Crossed => [
            Vector2::new(-70.0, -60.0),
            Vector2::new(70.0, 60.0),
            Vector2::new(70.0, -60.0),
            Vector2::new(-70.0, 60.0),
        ],
    };
    at.place(offsets)
}

/// `build_from_kind` keyed by name; unknown names are an error.
pub fn build_from_name(name: &str) -> Result<Quad> {
    Ok(build_from_kind(name.parse()?))
}

/// Full square parameter record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareConfig {
    pub side: f64,
    #[serde(flatten)]
    pub at: Placement,
}

/// A square given either by side length alone or by a full record.
///
/// Deserializes from a bare number or an object, so loosely typed renderer
/// input resolves to one explicit variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SquareSpec {
    BySideLength(f64),
    ByConfig(SquareConfig),
}

impl SquareSpec {
    pub fn build(&self) -> Result<Quad> {
        let (side, at) = match *self {
            SquareSpec::BySideLength(side) => (side, Placement::default()),
            SquareSpec::ByConfig(cfg) => (cfg.side, cfg.at),
        };
        build_square(side, at.center.x, at.center.y, at.rotation_deg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleConfig {
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub at: Placement,
}

/// A rectangle given by `[width, height]` or by a full record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RectangleSpec {
    BySize(f64, f64),
    ByConfig(RectangleConfig),
}

impl RectangleSpec {
    pub fn build(&self) -> Result<Quad> {
        let (w, h, at) = match *self {
            RectangleSpec::BySize(w, h) => (w, h, Placement::default()),
            RectangleSpec::ByConfig(cfg) => (cfg.width, cfg.height, cfg.at),
        };
        build_rectangle(w, h, at.center.x, at.center.y, at.rotation_deg)
    }
}
