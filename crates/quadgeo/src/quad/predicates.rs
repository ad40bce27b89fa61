//! Measures and geometric predicates on a single quadrilateral.
//!
//! All comparisons are tolerance based (`GeomCfg`). Each predicate has a
//! shorthand using the default tolerances and a `_cfg` variant.
//!
//! Orientation
//! - Positive `signed_area` means clockwise on a y-down screen (the builders'
//!   winding). Turn signs are compared against the area sign, so predicates do
//!   not depend on which winding the caller used.
//! - Convexity and self-intersection are computed independently; a concave
//!   quadrilateral is not crossed, and a crossed one with a real turn is never
//!   reported convex.

use nalgebra::Vector2;

use super::types::{Coord, Quad, SideId, VertexId};
use super::util::{cross, sign_eps, unit};
use crate::cfg::GeomCfg;

#[inline]
pub fn distance(a: Coord, b: Coord) -> f64 {
    (b.vec() - a.vec()).norm()
}

#[inline]
pub fn midpoint(a: Coord, b: Coord) -> Coord {
    Coord::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

#[inline]
pub fn side_length(q: &Quad, s: SideId) -> f64 {
    let (a, b) = q.side(s);
    (b - a).norm()
}

pub fn side_lengths(q: &Quad) -> [f64; 4] {
    SideId::ALL.map(|s| side_length(q, s))
}

pub fn perimeter(q: &Quad) -> f64 {
    side_lengths(q).iter().sum()
}

/// Shoelace area with sign (positive = clockwise on screen).
pub fn signed_area(q: &Quad) -> f64 {
    let mut acc = 0.0;
    for v in VertexId::ALL {
        let p = q.vec(v);
        let r = q.vec(v.next());
        acc += p.x * r.y - r.x * p.y;
    }
    0.5 * acc
}

/// Absolute shoelace area. For a crossed quadrilateral this is the
/// difference of the two lobes, not their union.
#[inline]
pub fn area(q: &Quad) -> f64 {
    signed_area(q).abs()
}

/// Vertex average. Used as the "inside" reference for outward directions.
pub fn centroid(q: &Quad) -> Coord {
    let sum = VertexId::ALL
        .iter()
        .fold(Vector2::zeros(), |acc, &v| acc + q.vec(v));
    Coord::from(sum / 4.0)
}

/// Sine of the turn at `v` (incoming edge to outgoing edge). `None` if an
/// incident edge is shorter than `eps_len`.
pub(crate) fn turn_sine(q: &Quad, v: VertexId, cfg: GeomCfg) -> Option<f64> {
    let e_in = unit(q.vec(v) - q.vec(v.prev()), cfg.eps_len)?;
    let e_out = unit(q.vec(v.next()) - q.vec(v), cfg.eps_len)?;
    Some(cross(e_in, e_out))
}

/// Interior angle at `v` in degrees, `[0, 360)`.
///
/// Reflex angles of concave quadrilaterals are reported as such (> 180): the
/// arccos of the edge dot product is flipped when the turn at `v` opposes the
/// overall orientation. Crossed or zero-area quadrilaterals have no interior,
/// so the unsigned angle between the incident edges is returned.
///
/// Returns `None` if an incident edge has zero length.
#[inline]
pub fn angle_at_vertex(q: &Quad, v: VertexId) -> Option<f64> {
    angle_at_vertex_cfg(q, v, GeomCfg::default())
}

pub fn angle_at_vertex_cfg(q: &Quad, v: VertexId, cfg: GeomCfg) -> Option<f64> {
    let p = q.vec(v);
    let a = unit(q.vec(v.prev()) - p, cfg.eps_len)?;
    let b = unit(q.vec(v.next()) - p, cfg.eps_len)?;
    let theta = a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees();
    let orientation = sign_eps(signed_area(q), cfg.eps_len);
    if orientation == 0 || is_self_intersecting_cfg(q, cfg) {
        return Some(theta);
    }
    let turn = sign_eps(cross(-a, b), cfg.eps_cross);
    if turn != 0 && turn != orientation {
        Some((360.0 - theta) % 360.0)
    } else {
        Some(theta)
    }
}

/// Interior angles at all four vertices.
pub fn angles(q: &Quad) -> [Option<f64>; 4] {
    angles_cfg(q, GeomCfg::default())
}

pub fn angles_cfg(q: &Quad, cfg: GeomCfg) -> [Option<f64>; 4] {
    VertexId::ALL.map(|v| angle_at_vertex_cfg(q, v, cfg))
}

/// Vertices whose interior angle is 90° within `eps_angle_deg`.
#[inline]
pub fn detect_right_angles(q: &Quad) -> Vec<VertexId> {
    detect_right_angles_cfg(q, GeomCfg::default())
}

pub fn detect_right_angles_cfg(q: &Quad, cfg: GeomCfg) -> Vec<VertexId> {
    VertexId::ALL
        .into_iter()
        .filter(|&v| {
            angle_at_vertex_cfg(q, v, cfg).is_some_and(|a| (a - 90.0).abs() <= cfg.eps_angle_deg)
        })
        .collect()
}

/// Opposite side pairs `(0,2)` / `(1,3)` whose directions are parallel.
/// Zero-length sides have no direction and never pair.
#[inline]
pub fn detect_parallel_sides(q: &Quad) -> Vec<(SideId, SideId)> {
    detect_parallel_sides_cfg(q, GeomCfg::default())
}

pub fn detect_parallel_sides_cfg(q: &Quad, cfg: GeomCfg) -> Vec<(SideId, SideId)> {
    SideId::OPPOSITE_PAIRS
        .into_iter()
        .filter(|&(s, t)| sides_parallel(q, s, t, cfg))
        .collect()
}

fn sides_parallel(q: &Quad, s: SideId, t: SideId, cfg: GeomCfg) -> bool {
    let (a0, a1) = q.side(s);
    let (b0, b1) = q.side(t);
    match (unit(a1 - a0, cfg.eps_len), unit(b1 - b0, cfg.eps_len)) {
        (Some(u), Some(w)) => cross(u, w).abs() <= cfg.eps_cross,
        _ => false,
    }
}

/// Groups (size ≥ 2) of sides with equal length, ordered by first side index.
/// Zero-length sides are left out.
#[inline]
pub fn detect_equal_sides(q: &Quad) -> Vec<Vec<SideId>> {
    detect_equal_sides_cfg(q, GeomCfg::default())
}

pub fn detect_equal_sides_cfg(q: &Quad, cfg: GeomCfg) -> Vec<Vec<SideId>> {
    let lens = side_lengths(q);
    let mut groups: Vec<(f64, Vec<SideId>)> = Vec::with_capacity(4);
    for s in SideId::ALL {
        let l = lens[s.index()];
        if l <= cfg.eps_len {
            continue;
        }
        match groups.iter_mut().find(|(rep, _)| (rep - l).abs() <= cfg.eps_len) {
            Some((_, members)) => members.push(s),
            None => groups.push((l, vec![s])),
        }
    }
    groups
        .into_iter()
        .filter(|(_, m)| m.len() >= 2)
        .map(|(_, m)| m)
        .collect()
}

/// Orientation of `c` relative to the directed line `a→b`, with a dead zone
/// of `eps` measured as distance from the line.
fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, eps: f64) -> i8 {
    let ab = b - a;
    sign_eps(cross(ab, c - a), eps * ab.norm().max(1.0))
}

fn within_box(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Closed segments `p1p2` and `p3p4` share at least one point (touching counts).
pub fn segments_intersect(p1: Coord, p2: Coord, p3: Coord, p4: Coord, cfg: GeomCfg) -> bool {
    let (a, b, c, d) = (p1.vec(), p2.vec(), p3.vec(), p4.vec());
    let eps = cfg.eps_len;
    let o1 = orient(a, b, c, eps);
    let o2 = orient(a, b, d, eps);
    let o3 = orient(c, d, a, eps);
    let o4 = orient(c, d, b, eps);
    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }
    (o1 == 0 && within_box(a, b, c, eps))
        || (o2 == 0 && within_box(a, b, d, eps))
        || (o3 == 0 && within_box(c, d, a, eps))
        || (o4 == 0 && within_box(c, d, b, eps))
}

/// Parameters `(t, u)` with `p1 + t (p2-p1) = p3 + u (p4-p3)` for the two
/// supporting lines, or `None` if they are parallel or a segment is degenerate.
pub(crate) fn line_params(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    p4: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<(f64, f64)> {
    let r = p2 - p1;
    let s = p4 - p3;
    let (rn, sn) = (r.norm(), s.norm());
    if rn <= cfg.eps_len || sn <= cfg.eps_len {
        return None;
    }
    let denom = cross(r, s);
    if denom.abs() <= cfg.eps_cross * rn * sn {
        return None;
    }
    let qp = p3 - p1;
    Some((cross(qp, s) / denom, cross(qp, r) / denom))
}

/// Intersection point of the closed segments `p1p2` and `p3p4`; `None` if they
/// are parallel (including collinear overlap) or miss each other.
pub fn segment_intersection(
    p1: Coord,
    p2: Coord,
    p3: Coord,
    p4: Coord,
    cfg: GeomCfg,
) -> Option<Coord> {
    let (a, b) = (p1.vec(), p2.vec());
    let (t, u) = line_params(a, b, p3.vec(), p4.vec(), cfg)?;
    let tol_t = cfg.eps_len / (b - a).norm();
    let tol_u = cfg.eps_len / (p4.vec() - p3.vec()).norm();
    let inside = |x: f64, tol: f64| (-tol..=1.0 + tol).contains(&x);
    if inside(t, tol_t) && inside(u, tol_u) {
        Some(Coord::from(a + (b - a) * t))
    } else {
        None
    }
}

/// True iff non-adjacent edges (0,1)/(2,3) or (1,2)/(3,0) touch or cross.
#[inline]
pub fn is_self_intersecting(q: &Quad) -> bool {
    is_self_intersecting_cfg(q, GeomCfg::default())
}

pub fn is_self_intersecting_cfg(q: &Quad, cfg: GeomCfg) -> bool {
    SideId::OPPOSITE_PAIRS.into_iter().any(|(s, t)| {
        let (a, b) = s.endpoints();
        let (c, d) = t.endpoints();
        segments_intersect(q.coord(a), q.coord(b), q.coord(c), q.coord(d), cfg)
    })
}

/// All non-negligible turns share one sign.
///
/// Collinear turns and zero-length edges are skipped. A fully degenerate
/// quadrilateral (every turn negligible, e.g. all vertices collinear) is
/// treated as convex.
#[inline]
pub fn is_convex(q: &Quad) -> bool {
    is_convex_cfg(q, GeomCfg::default())
}

pub fn is_convex_cfg(q: &Quad, cfg: GeomCfg) -> bool {
    let mut sign = 0i8;
    for v in VertexId::ALL {
        let Some(s) = turn_sine(q, v, cfg) else {
            continue;
        };
        match (sign, sign_eps(s, cfg.eps_cross)) {
            (_, 0) => {}
            (0, t) => sign = t,
            (cur, t) if cur != t => return false,
            _ => {}
        }
    }
    if sign == 0 {
        tracing::trace!("no significant turn; degenerate quadrilateral treated as convex");
    }
    true
}

/// The reflex vertex of a simple concave quadrilateral (there is at most one).
#[inline]
pub fn concave_vertex(q: &Quad) -> Option<VertexId> {
    concave_vertex_cfg(q, GeomCfg::default())
}

pub fn concave_vertex_cfg(q: &Quad, cfg: GeomCfg) -> Option<VertexId> {
    if is_self_intersecting_cfg(q, cfg) || is_convex_cfg(q, cfg) {
        return None;
    }
    let orientation = sign_eps(signed_area(q), cfg.eps_len);
    if orientation == 0 {
        return None;
    }
    VertexId::ALL.into_iter().find(|&v| {
        turn_sine(q, v, cfg).is_some_and(|s| {
            let t = sign_eps(s, cfg.eps_cross);
            t != 0 && t != orientation
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Quad {
        Quad::from_coords([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn measures_of_unit_square() {
        let q = unit_square();
        assert!((signed_area(&q) - 1.0).abs() < 1e-12);
        assert!((perimeter(&q) - 4.0).abs() < 1e-12);
        assert_eq!(centroid(&q), Coord::new(0.5, 0.5));
        assert_eq!(midpoint(Coord::new(0.0, 0.0), Coord::new(2.0, 4.0)), Coord::new(1.0, 2.0));
        assert!((distance(Coord::new(0.0, 0.0), Coord::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_winding_keeps_interior_angles() {
        let q = Quad::from_coords([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(signed_area(&q) < 0.0);
        for v in VertexId::ALL {
            assert!((angle_at_vertex(&q, v).unwrap() - 90.0).abs() < 1e-9);
        }
    }

    #[test]
    fn touching_segments_count_as_intersecting() {
        let cfg = GeomCfg::default();
        let o = Coord::new(0.0, 0.0);
        let a = Coord::new(2.0, 0.0);
        assert!(segments_intersect(o, a, Coord::new(1.0, 0.0), Coord::new(1.0, 3.0), cfg));
        assert!(!segments_intersect(o, a, Coord::new(3.0, 0.0), Coord::new(3.0, 3.0), cfg));
        // collinear overlap
        assert!(segments_intersect(o, a, Coord::new(1.0, 0.0), Coord::new(5.0, 0.0), cfg));
        assert!(segment_intersection(o, a, Coord::new(1.0, 0.0), Coord::new(5.0, 0.0), cfg).is_none());
        let x = segment_intersection(o, Coord::new(2.0, 2.0), Coord::new(0.0, 2.0), a, cfg).unwrap();
        assert!((x.x - 1.0).abs() < 1e-12 && (x.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_side_is_degenerate_not_error() {
        let q = Quad::from_coords([(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(angle_at_vertex(&q, VertexId::V0).is_none());
        assert!(angle_at_vertex(&q, VertexId::V1).is_none());
        assert!(detect_parallel_sides(&q).is_empty());
        assert!(detect_equal_sides(&q).iter().all(|g| !g.contains(&SideId::S0)));
    }

    #[test]
    fn collinear_quad_is_convex_fallback() {
        let q = Quad::from_coords([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(is_convex(&q));
        assert!(concave_vertex(&q).is_none());
    }

    #[test]
    fn equal_side_groups_are_partitioned() {
        // kite: sides 0,3 equal and 1,2 equal
        let q = Quad::from_coords([(0.0, -3.0), (2.0, 0.0), (0.0, 5.0), (-2.0, 0.0)]);
        let groups = detect_equal_sides(&q);
        assert_eq!(groups, vec![vec![SideId::S0, SideId::S3], vec![SideId::S1, SideId::S2]]);
    }
}
