//! Bounding box and label placement.
//!
//! Every label is pushed away from the vertex average (`centroid`) so it sits
//! outside the fill. Side labels use the side's outward normal; when the
//! centroid lies on the side's line the orientation of the quadrilateral
//! decides.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cfg::GeomCfg;
use crate::error::{require_finite, GeomError, Result};
use crate::quad::util::{perp, sign_eps, unit};
use crate::quad::{
    angle_at_vertex, centroid, midpoint, signed_area, Coord, Quad, SideId, VertexId,
};

/// Axis-aligned box in the renderer's `viewBox` shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }
    pub fn contains(&self, p: Coord) -> bool {
        p.x >= self.min_x && p.x <= self.max_x() && p.y >= self.min_y && p.y <= self.max_y()
    }
    /// `"minX minY width height"`.
    pub fn to_attr(&self) -> String {
        use super::path::fmt_num;
        format!(
            "{} {} {} {}",
            fmt_num(self.min_x),
            fmt_num(self.min_y),
            fmt_num(self.width),
            fmt_num(self.height)
        )
    }
}

/// Bounding box of the four vertices grown by `padding` on every side.
/// `padding` must be finite and non-negative.
pub fn calculate_view_box(q: &Quad, padding: f64) -> Result<ViewBox> {
    require_finite("padding", padding)?;
    if padding < 0.0 {
        return Err(GeomError::invalid(
            "padding",
            format!("must be >= 0, got {padding}"),
        ));
    }
    let cs = q.coords();
    let (mut lo, mut hi) = (cs[0], cs[0]);
    for c in &cs[1..] {
        lo.x = lo.x.min(c.x);
        lo.y = lo.y.min(c.y);
        hi.x = hi.x.max(c.x);
        hi.y = hi.y.max(c.y);
    }
    Ok(ViewBox {
        min_x: lo.x - padding,
        min_y: lo.y - padding,
        width: hi.x - lo.x + 2.0 * padding,
        height: hi.y - lo.y + 2.0 * padding,
    })
}

fn apply_offset(q: &Quad, v: VertexId, p: Vector2<f64>) -> Coord {
    match q[v].label_offset {
        Some(o) => Coord::new(p.x + o.dx, p.y + o.dy),
        None => Coord::from(p),
    }
}

/// Vertex label `distance` away from the vertex, on the ray from the centroid
/// through the vertex. Reflex vertices, and vertices sitting on the centroid,
/// use the outward bisector instead so the label lands in the notch.
/// The vertex's own `label_offset` is added afterwards.
pub fn vertex_label_position(q: &Quad, v: VertexId, distance: f64) -> Coord {
    let p = q.vec(v);
    let from_center = unit(p - centroid(q).vec(), GeomCfg::default().eps_len);
    let reflex = angle_at_vertex(q, v).is_some_and(|deg| deg > 180.0);
    let dir = match from_center {
        Some(d) if !reflex => Some(d),
        _ => interior_bisector(q, v).map(|d| -d).or(from_center),
    }
    .unwrap_or_else(|| Vector2::new(0.0, -1.0));
    apply_offset(q, v, p + dir * distance)
}

/// Unit normal of side `s` pointing away from the shape; `None` for a
/// zero-length side.
pub fn side_outward_normal(q: &Quad, s: SideId) -> Option<Vector2<f64>> {
    let cfg = GeomCfg::default();
    let (a, b) = q.side(s);
    let d = unit(b - a, cfg.eps_len)?;
    let n = perp(d);
    let to_center = centroid(q).vec() - (a + b) * 0.5;
    let side_of_center = to_center.dot(&n);
    let n = if side_of_center.abs() > cfg.eps_len {
        if side_of_center > 0.0 {
            -n
        } else {
            n
        }
    } else if sign_eps(signed_area(q), cfg.eps_len) < 0 {
        n
    } else {
        // positive (screen-clockwise) winding: outside is to the left of travel
        -n
    };
    Some(n)
}

/// Side label at the side midpoint pushed `distance` along the outward normal.
pub fn side_label_position(q: &Quad, s: SideId, distance: f64) -> Option<Coord> {
    let (a, b) = s.endpoints();
    let mid = midpoint(q.coord(a), q.coord(b)).vec();
    let n = side_outward_normal(q, s)?;
    Some(Coord::from(mid + n * distance))
}

/// Diagonal label a quarter of the way from `from` to `to`, pushed
/// `distance` off the diagonal on the side away from the centroid.
///
/// Errors if the pair is not a diagonal; `None` for a zero-length diagonal.
pub fn diagonal_label_position(
    q: &Quad,
    from: VertexId,
    to: VertexId,
    distance: f64,
) -> Result<Option<Coord>> {
    if !from.is_diagonal_with(to) {
        return Err(GeomError::NotADiagonal {
            from: from.index(),
            to: to.index(),
        });
    }
    let cfg = GeomCfg::default();
    let (a, b) = (q.vec(from), q.vec(to));
    let Some(d) = unit(b - a, cfg.eps_len) else {
        return Ok(None);
    };
    let anchor = a + (b - a) * 0.25;
    let mut n = perp(d);
    let side_of_center = (centroid(q).vec() - anchor).dot(&n);
    if side_of_center > cfg.eps_len {
        n = -n;
    }
    Ok(Some(Coord::from(anchor + n * distance)))
}

/// Degree label inside the angle at `v`, `distance` along the interior
/// bisector. Reflex angles put the label on the reflex side.
pub fn angle_label_position(q: &Quad, v: VertexId, distance: f64) -> Option<Coord> {
    let dir = interior_bisector(q, v)?;
    Some(Coord::from(q.vec(v) + dir * distance))
}

/// Unit direction halving the interior angle at `v`.
pub(crate) fn interior_bisector(q: &Quad, v: VertexId) -> Option<Vector2<f64>> {
    let cfg = GeomCfg::default();
    let p = q.vec(v);
    let a = unit(q.vec(v.prev()) - p, cfg.eps_len)?;
    let b = unit(q.vec(v.next()) - p, cfg.eps_len)?;
    let reflex = angle_at_vertex(q, v).is_some_and(|deg| deg > 180.0);
    let dir = match unit(a + b, cfg.eps_len) {
        Some(u) => u,
        // straight angle: perpendicular, towards the centroid
        None => {
            let n = perp(a);
            if (centroid(q).vec() - p).dot(&n) < 0.0 {
                -n
            } else {
                n
            }
        }
    };
    Some(if reflex { -dir } else { dir })
}
