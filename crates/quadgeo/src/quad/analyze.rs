//! Aggregate property report.
//!
//! `QuadReport` is the one place where predicate results are combined; the
//! classifier and the layout engine read it instead of re-running predicates.

use serde::Serialize;

use super::diagonals::{
    diagonal_intersection_cfg, diagonal_lengths, diagonals_are_equal_cfg,
    diagonals_are_perpendicular_cfg, diagonals_bisect_each_other_cfg,
};
use super::kind::QuadKind;
use super::predicates::{
    angles_cfg, concave_vertex_cfg, detect_equal_sides_cfg, detect_parallel_sides_cfg,
    detect_right_angles_cfg, is_convex_cfg, is_self_intersecting_cfg, perimeter, side_lengths,
    signed_area,
};
use super::types::{Coord, Quad, SideId, VertexId};
use crate::cfg::GeomCfg;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagonalReport {
    pub intersection: Option<Coord>,
    pub lengths: [f64; 2],
    pub bisect: bool,
    pub equal: bool,
    pub perpendicular: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadReport {
    pub kind: QuadKind,
    pub is_convex: bool,
    pub is_self_intersecting: bool,
    pub concave_vertex: Option<VertexId>,
    pub right_angle_vertices: Vec<VertexId>,
    pub parallel_pairs: Vec<(SideId, SideId)>,
    pub equal_side_groups: Vec<Vec<SideId>>,
    pub diagonals: DiagonalReport,
    pub angles: [Option<f64>; 4],
    pub side_lengths: [f64; 4],
    pub signed_area: f64,
    pub perimeter: f64,
}

impl QuadReport {
    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }
    pub fn is_right_angle(&self, v: VertexId) -> bool {
        self.right_angle_vertices.contains(&v)
    }
    /// Side belongs to a detected parallel pair.
    pub fn is_parallel_side(&self, s: SideId) -> bool {
        self.parallel_pairs.iter().any(|&(a, b)| a == s || b == s)
    }
    /// Equal-side group containing `s`, if any.
    pub fn equal_group_of(&self, s: SideId) -> Option<usize> {
        self.equal_side_groups.iter().position(|g| g.contains(&s))
    }
}

#[inline]
pub fn analyze_quadrilateral(q: &Quad) -> QuadReport {
    analyze_quadrilateral_cfg(q, GeomCfg::default())
}

pub fn analyze_quadrilateral_cfg(q: &Quad, cfg: GeomCfg) -> QuadReport {
    let lengths = side_lengths(q);
    let mut report = QuadReport {
        kind: QuadKind::Generic,
        is_convex: is_convex_cfg(q, cfg),
        is_self_intersecting: is_self_intersecting_cfg(q, cfg),
        concave_vertex: concave_vertex_cfg(q, cfg),
        right_angle_vertices: detect_right_angles_cfg(q, cfg),
        parallel_pairs: detect_parallel_sides_cfg(q, cfg),
        equal_side_groups: detect_equal_sides_cfg(q, cfg),
        diagonals: DiagonalReport {
            intersection: diagonal_intersection_cfg(q, cfg),
            lengths: diagonal_lengths(q),
            bisect: diagonals_bisect_each_other_cfg(q, cfg),
            equal: diagonals_are_equal_cfg(q, cfg),
            perpendicular: diagonals_are_perpendicular_cfg(q, cfg),
        },
        angles: angles_cfg(q, cfg),
        side_lengths: lengths,
        signed_area: signed_area(q),
        perimeter: perimeter(q),
    };
    report.kind = classify_report(&report);
    tracing::debug!(
        kind = %report.kind,
        convex = report.is_convex,
        crossed = report.is_self_intersecting,
        "analyzed quadrilateral"
    );
    report
}

/// Most specific kind, checked in the order
/// crossed, concave, square, rectangle, rhombus, parallelogram, kite, trapezoid.
#[inline]
pub fn classify(q: &Quad) -> QuadKind {
    analyze_quadrilateral(q).kind
}

fn classify_report(r: &QuadReport) -> QuadKind {
    if r.is_self_intersecting {
        return QuadKind::Crossed;
    }
    if !r.is_convex {
        return QuadKind::Concave;
    }
    let all_right = r.right_angle_vertices.len() == 4;
    let all_equal = r.equal_side_groups.iter().any(|g| g.len() == 4);
    match r.parallel_pairs.len() {
        2 if all_right && all_equal => QuadKind::Square,
        2 if all_right => QuadKind::Rectangle,
        2 if all_equal => QuadKind::Rhombus,
        2 => QuadKind::Parallelogram,
        _ if is_kite(r) => QuadKind::Kite,
        1 => QuadKind::Trapezoid,
        _ => QuadKind::Generic,
    }
}

/// Two disjoint pairs of adjacent equal sides: {0,1}/{2,3} or {1,2}/{3,0}.
fn is_kite(r: &QuadReport) -> bool {
    let same = |a: usize, b: usize| {
        r.equal_side_groups
            .iter()
            .any(|g| g.contains(&SideId::ALL[a]) && g.contains(&SideId::ALL[b]))
    };
    (same(0, 1) && same(2, 3)) || (same(1, 2) && same(3, 0))
}
