//! Diagonals (0,2) and (1,3): intersection and the three classic relations.

use super::predicates::{line_params, midpoint};
use super::types::{Coord, Quad, VertexId};
use super::util::unit;
use crate::cfg::GeomCfg;

/// Intersection of the lines through (v0,v2) and (v1,v3).
///
/// For convex quadrilaterals this lies on both diagonal segments; for concave
/// ones it may lie on an extension. `None` when the diagonals are parallel or
/// one of them has zero length.
#[inline]
pub fn diagonal_intersection(q: &Quad) -> Option<Coord> {
    diagonal_intersection_cfg(q, GeomCfg::default())
}

pub fn diagonal_intersection_cfg(q: &Quad, cfg: GeomCfg) -> Option<Coord> {
    let p0 = q.vec(VertexId::V0);
    let p2 = q.vec(VertexId::V2);
    let Some((t, _)) = line_params(p0, p2, q.vec(VertexId::V1), q.vec(VertexId::V3), cfg) else {
        tracing::trace!("diagonals parallel or degenerate; no intersection");
        return None;
    };
    Some(Coord::from(p0 + (p2 - p0) * t))
}

/// The intersection is the midpoint of both diagonals.
#[inline]
pub fn diagonals_bisect_each_other(q: &Quad) -> bool {
    diagonals_bisect_each_other_cfg(q, GeomCfg::default())
}

pub fn diagonals_bisect_each_other_cfg(q: &Quad, cfg: GeomCfg) -> bool {
    let Some(x) = diagonal_intersection_cfg(q, cfg) else {
        return false;
    };
    let m02 = midpoint(q.coord(VertexId::V0), q.coord(VertexId::V2));
    let m13 = midpoint(q.coord(VertexId::V1), q.coord(VertexId::V3));
    (x.vec() - m02.vec()).norm() <= cfg.eps_len && (x.vec() - m13.vec()).norm() <= cfg.eps_len
}

#[inline]
pub fn diagonals_are_equal(q: &Quad) -> bool {
    diagonals_are_equal_cfg(q, GeomCfg::default())
}

pub fn diagonals_are_equal_cfg(q: &Quad, cfg: GeomCfg) -> bool {
    let [d02, d13] = diagonal_lengths(q);
    (d02 - d13).abs() <= cfg.eps_len
}

/// Dot product of the unit diagonal directions is ~0. Zero-length diagonals
/// have no direction and are never perpendicular.
#[inline]
pub fn diagonals_are_perpendicular(q: &Quad) -> bool {
    diagonals_are_perpendicular_cfg(q, GeomCfg::default())
}

pub fn diagonals_are_perpendicular_cfg(q: &Quad, cfg: GeomCfg) -> bool {
    let d02 = unit(q.vec(VertexId::V2) - q.vec(VertexId::V0), cfg.eps_len);
    let d13 = unit(q.vec(VertexId::V3) - q.vec(VertexId::V1), cfg.eps_len);
    match (d02, d13) {
        (Some(a), Some(b)) => a.dot(&b).abs() <= cfg.eps_cross,
        _ => false,
    }
}

/// Lengths of (v0,v2) and (v1,v3).
pub fn diagonal_lengths(q: &Quad) -> [f64; 2] {
    [
        (q.vec(VertexId::V2) - q.vec(VertexId::V0)).norm(),
        (q.vec(VertexId::V3) - q.vec(VertexId::V1)).norm(),
    ]
}
