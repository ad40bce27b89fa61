//! Angle arcs, right-angle markers and tick marks.
//!
//! Arc sweep follows the SVG convention: `sweep = true` draws in the
//! positive-angle direction, which is clockwise on a y-down screen.

use std::fmt::Write as _;

use nalgebra::Vector2;
use serde::Serialize;

use super::labels::interior_bisector;
use super::path::{fmt_num, push_cmd, segment_path};
use crate::cfg::GeomCfg;
use crate::quad::util::{heading_deg, perp, unit, wrap_deg};
use crate::quad::{angle_at_vertex, Coord, Quad, SideId, VertexId};

/// Which side of the vertex an angle arc covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcSpan {
    /// The non-reflex opening between the two edges (≤ 180°).
    #[default]
    Minor,
    /// The interior angle, which is the reflex one at a concave vertex.
    Interior,
}

/// Circular arc around a vertex, from the edge toward `v-1` to the edge
/// toward `v+1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcDesc {
    pub center: Coord,
    pub start: Coord,
    pub end: Coord,
    pub radius: f64,
    /// Heading of `start` seen from `center`, degrees.
    pub start_angle_deg: f64,
    /// Unsigned angular extent, degrees.
    pub sweep_deg: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcDesc {
    /// `M start A r r 0 large sweep end`.
    pub fn to_path(&self) -> String {
        let mut out = String::new();
        push_cmd(&mut out, 'M', self.start);
        let r = fmt_num(self.radius);
        let _ = write!(
            out,
            " A {r} {r} 0 {} {} {} {}",
            u8::from(self.large_arc),
            u8::from(self.sweep),
            fmt_num(self.end.x),
            fmt_num(self.end.y)
        );
        out
    }
}

#[inline]
pub fn describe_angle_arc(q: &Quad, v: VertexId, radius: f64) -> Option<ArcDesc> {
    describe_angle_arc_span(q, v, radius, ArcSpan::Minor)
}

/// Arc at `v`. With `ArcSpan::Minor` the arc never takes the reflex side;
/// `ArcSpan::Interior` takes it only when the interior angle is reflex.
/// `None` if an incident edge has zero length.
pub fn describe_angle_arc_span(
    q: &Quad,
    v: VertexId,
    radius: f64,
    span: ArcSpan,
) -> Option<ArcDesc> {
    let cfg = GeomCfg::default();
    let p = q.vec(v);
    let a = unit(q.vec(v.prev()) - p, cfg.eps_len)?;
    let b = unit(q.vec(v.next()) - p, cfg.eps_len)?;
    let start_angle = heading_deg(a);
    let delta = wrap_deg(heading_deg(b) - start_angle);
    let reflex =
        span == ArcSpan::Interior && angle_at_vertex(q, v).is_some_and(|deg| deg > 180.0);
    let (sweep_deg, sweep, large_arc) = if reflex {
        (360.0 - delta.abs(), delta < 0.0, true)
    } else if delta.abs() > 180.0 - cfg.eps_angle_deg {
        // straight vertex: both half turns have the same size, bend toward the interior
        let inward = interior_bisector(q, v).map_or(delta > 0.0, |d| perp(a).dot(&d) > 0.0);
        (delta.abs(), inward, false)
    } else {
        (delta.abs(), delta > 0.0, false)
    };
    Some(ArcDesc {
        center: Coord::from(p),
        start: Coord::from(p + a * radius),
        end: Coord::from(p + b * radius),
        radius,
        start_angle_deg: start_angle,
        sweep_deg,
        large_arc,
        sweep,
    })
}

/// Square-corner marker: `first` on the edge toward `v-1`, `corner` diagonal
/// from the vertex, `second` on the edge toward `v+1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RightAngleMarker {
    pub vertex: Coord,
    pub first: Coord,
    pub corner: Coord,
    pub second: Coord,
    pub size: f64,
    /// Heading of the first edge, degrees.
    pub orientation_deg: f64,
}

impl RightAngleMarker {
    pub fn to_path(&self) -> String {
        super::path::polyline_path(&[self.first, self.corner, self.second])
    }
}

pub fn describe_right_angle_marker(q: &Quad, v: VertexId, size: f64) -> Option<RightAngleMarker> {
    let eps = GeomCfg::default().eps_len;
    let p = q.vec(v);
    let a = unit(q.vec(v.prev()) - p, eps)?;
    let b = unit(q.vec(v.next()) - p, eps)?;
    Some(RightAngleMarker {
        vertex: Coord::from(p),
        first: Coord::from(p + a * size),
        corner: Coord::from(p + (a + b) * size),
        second: Coord::from(p + b * size),
        size,
        orientation_deg: heading_deg(a),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tick {
    pub start: Coord,
    pub end: Coord,
}

impl Tick {
    pub fn to_path(&self) -> String {
        segment_path(self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Parallel,
    Equal,
}

/// Tick group on one side. Parallel and equal marks share geometry; `kind`
/// lets the renderer style them apart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marks {
    pub kind: MarkKind,
    pub side: SideId,
    pub ticks: Vec<Tick>,
}

/// `count` ticks of `length` perpendicular to `a→b`, `spacing` apart and
/// centered on the segment midpoint. `None` for a zero-length segment.
pub(crate) fn ticks_on_segment(
    a: Vector2<f64>,
    b: Vector2<f64>,
    count: usize,
    spacing: f64,
    length: f64,
) -> Option<Vec<Tick>> {
    let d = unit(b - a, GeomCfg::default().eps_len)?;
    let n = perp(d);
    let mid = (a + b) * 0.5;
    let half = length * 0.5;
    let first = -(count.saturating_sub(1) as f64) * spacing * 0.5;
    Some(
        (0..count)
            .map(|k| {
                let c = mid + d * (first + k as f64 * spacing);
                Tick {
                    start: Coord::from(c - n * half),
                    end: Coord::from(c + n * half),
                }
            })
            .collect(),
    )
}

fn side_marks(
    q: &Quad,
    s: SideId,
    kind: MarkKind,
    count: usize,
    spacing: f64,
    length: f64,
) -> Option<Marks> {
    let (a, b) = q.side(s);
    let ticks = ticks_on_segment(a, b, count, spacing, length)?;
    Some(Marks {
        kind,
        side: s,
        ticks,
    })
}

/// Parallel-side ticks. `count == 0` gives an empty tick list.
pub fn describe_parallel_marks(
    q: &Quad,
    s: SideId,
    count: usize,
    spacing: f64,
    length: f64,
) -> Option<Marks> {
    side_marks(q, s, MarkKind::Parallel, count, spacing, length)
}

/// Equal-length ticks; same geometry as `describe_parallel_marks`.
pub fn describe_equal_marks(
    q: &Quad,
    s: SideId,
    count: usize,
    spacing: f64,
    length: f64,
) -> Option<Marks> {
    side_marks(q, s, MarkKind::Equal, count, spacing, length)
}

/// Degrees as display text: whole numbers when within 0.05°, else one decimal.
pub fn format_degrees(deg: f64) -> String {
    if (deg - deg.round()).abs() < 0.05 {
        format!("{:.0}°", deg.round())
    } else {
        format!("{deg:.1}°")
    }
}
