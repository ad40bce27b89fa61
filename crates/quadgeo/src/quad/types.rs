//! Points, vertex/side identifiers and the quadrilateral itself.
//!
//! - `Coord`: bare screen-space position (y grows downward).
//! - `Point`: a `Coord` plus optional label metadata.
//! - `VertexId`, `SideId`: checked indices in `0..=3`; adjacency wraps mod 4.
//! - `Quad`: ordered 4-cycle `v0→v1→v2→v3→v0`. May be concave or crossed.

use std::fmt;
use std::ops::Index;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};

/// Screen-space position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn vec(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Coord {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Coord {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Manual nudge applied to a label after automatic placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Labeled vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_offset: Option<LabelOffset>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            label_offset: None,
        }
    }
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn with_label_offset(mut self, dx: f64, dy: f64) -> Self {
        self.label_offset = Some(LabelOffset { dx, dy });
        self
    }
    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
    #[inline]
    pub fn vec(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Self {
        Self::new(c.x, c.y)
    }
}

/// Vertex index in `0..=3`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct VertexId(u8);

impl VertexId {
    pub const V0: VertexId = VertexId(0);
    pub const V1: VertexId = VertexId(1);
    pub const V2: VertexId = VertexId(2);
    pub const V3: VertexId = VertexId(3);
    pub const ALL: [VertexId; 4] = [Self::V0, Self::V1, Self::V2, Self::V3];

    pub fn new(index: usize) -> Result<Self> {
        if index < 4 {
            Ok(Self(index as u8))
        } else {
            Err(GeomError::IndexOutOfRange {
                what: "vertex",
                index,
            })
        }
    }
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 4)
    }
    #[inline]
    pub fn prev(self) -> Self {
        Self((self.0 + 3) % 4)
    }
    /// The vertex joined to `self` by a diagonal.
    #[inline]
    pub fn opposite(self) -> Self {
        Self((self.0 + 2) % 4)
    }
    /// True if `self`–`other` is one of the two diagonals (0,2) or (1,3).
    #[inline]
    pub fn is_diagonal_with(self, other: VertexId) -> bool {
        self.opposite() == other
    }
}

impl TryFrom<usize> for VertexId {
    type Error = GeomError;
    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<VertexId> for usize {
    fn from(v: VertexId) -> usize {
        v.index()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side index in `0..=3`; side `i` runs from vertex `i` to vertex `i+1 mod 4`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct SideId(u8);

impl SideId {
    pub const S0: SideId = SideId(0);
    pub const S1: SideId = SideId(1);
    pub const S2: SideId = SideId(2);
    pub const S3: SideId = SideId(3);
    pub const ALL: [SideId; 4] = [Self::S0, Self::S1, Self::S2, Self::S3];
    /// The two pairs of opposite sides.
    pub const OPPOSITE_PAIRS: [(SideId, SideId); 2] = [(Self::S0, Self::S2), (Self::S1, Self::S3)];

    pub fn new(index: usize) -> Result<Self> {
        if index < 4 {
            Ok(Self(index as u8))
        } else {
            Err(GeomError::IndexOutOfRange {
                what: "side",
                index,
            })
        }
    }
    /// Side that starts at `v`.
    #[inline]
    pub fn starting_at(v: VertexId) -> Self {
        Self(v.0)
    }
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub fn endpoints(self) -> (VertexId, VertexId) {
        let a = VertexId(self.0);
        (a, a.next())
    }
    #[inline]
    pub fn opposite(self) -> Self {
        Self((self.0 + 2) % 4)
    }
}

impl TryFrom<usize> for SideId {
    type Error = GeomError;
    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<SideId> for usize {
    fn from(s: SideId) -> usize {
        s.index()
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered quadrilateral `[v0, v1, v2, v3]`.
///
/// Invariants:
/// - Exactly four points (enforced by the array type).
/// - Sides are (0,1),(1,2),(2,3),(3,0); diagonals are (0,2),(1,3).
/// - No convexity or simplicity requirement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad([Point; 4]);

impl Quad {
    pub fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn from_coords(coords: [(f64, f64); 4]) -> Self {
        Self(coords.map(|(x, y)| Point::new(x, y)))
    }

    /// Checked construction from a loose list (e.g. parsed user input).
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        let n = points.len();
        let arr: [Point; 4] = points
            .try_into()
            .map_err(|_| GeomError::VertexCount(n))?;
        for (i, p) in arr.iter().enumerate() {
            if !p.coord().is_finite() {
                return Err(GeomError::invalid(
                    "points",
                    format!("vertex {i} has non-finite coordinates"),
                ));
            }
        }
        Ok(Self(arr))
    }

    #[inline]
    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }
    #[inline]
    pub fn into_points(self) -> [Point; 4] {
        self.0
    }
    #[inline]
    pub fn vec(&self, v: VertexId) -> Vector2<f64> {
        self.0[v.index()].vec()
    }
    #[inline]
    pub fn coord(&self, v: VertexId) -> Coord {
        self.0[v.index()].coord()
    }
    #[inline]
    pub fn coords(&self) -> [Coord; 4] {
        VertexId::ALL.map(|v| self.coord(v))
    }
    /// Endpoints of side `s` in traversal order.
    #[inline]
    pub fn side(&self, s: SideId) -> (Vector2<f64>, Vector2<f64>) {
        let (a, b) = s.endpoints();
        (self.vec(a), self.vec(b))
    }

    /// Fill in "A".."D" for vertices that carry no label.
    pub fn with_default_labels(mut self) -> Self {
        for (p, name) in self.0.iter_mut().zip(["A", "B", "C", "D"]) {
            if p.label.is_none() {
                p.label = Some(name.to_string());
            }
        }
        self
    }

    /// Apply `f` to every position, keeping labels and offsets.
    pub fn map_positions(&self, f: impl Fn(Vector2<f64>) -> Vector2<f64>) -> Self {
        let mut out = self.clone();
        for p in out.0.iter_mut() {
            let q = f(p.vec());
            p.x = q.x;
            p.y = q.y;
        }
        out
    }
}

impl Index<VertexId> for Quad {
    type Output = Point;
    #[inline]
    fn index(&self, v: VertexId) -> &Point {
        &self.0[v.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_wrap_and_reject_out_of_range() {
        assert_eq!(VertexId::V3.next(), VertexId::V0);
        assert_eq!(VertexId::V0.prev(), VertexId::V3);
        assert_eq!(SideId::S3.endpoints(), (VertexId::V3, VertexId::V0));
        assert!(VertexId::V1.is_diagonal_with(VertexId::V3));
        assert!(!VertexId::V1.is_diagonal_with(VertexId::V2));
        assert_eq!(
            VertexId::new(4),
            Err(GeomError::IndexOutOfRange {
                what: "vertex",
                index: 4
            })
        );
        assert!(SideId::new(7).is_err());
    }

    #[test]
    fn from_points_requires_four() {
        let three = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(Quad::from_points(three), Err(GeomError::VertexCount(3)));
        let bad = vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!(Quad::from_points(bad).is_err());
    }

    #[test]
    fn serde_shape_is_stable() {
        let q = Quad::from_coords([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
            .with_default_labels();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json[0]["label"], "A");
        assert_eq!(json[2]["x"], 1.0);
        assert!(json[0].get("labelOffset").is_none());
        let back: Quad = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
        let idx: std::result::Result<VertexId, _> = serde_json::from_str("5");
        assert!(idx.is_err());
    }
}
