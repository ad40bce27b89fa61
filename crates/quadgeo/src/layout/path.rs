//! Path-description strings (`M`/`L`/`A`/`Z` mini-language).
//!
//! Numbers are rounded to three decimals with trailing zeros stripped, so the
//! same geometry always yields the same string.

use std::fmt::Write as _;

use crate::error::{GeomError, Result};
use crate::quad::{Coord, Quad, VertexId};

pub(crate) fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    // avoid "-0"
    let r = if r == 0.0 { 0.0 } else { r };
    let mut s = format!("{r:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

pub(crate) fn push_cmd(out: &mut String, cmd: char, p: Coord) {
    if !out.is_empty() {
        out.push(' ');
    }
    let _ = write!(out, "{cmd} {} {}", fmt_num(p.x), fmt_num(p.y));
}

/// Open polyline through `points`.
pub fn polyline_path(points: &[Coord]) -> String {
    let mut out = String::new();
    for (i, &p) in points.iter().enumerate() {
        push_cmd(&mut out, if i == 0 { 'M' } else { 'L' }, p);
    }
    out
}

/// Single straight segment.
#[inline]
pub fn segment_path(a: Coord, b: Coord) -> String {
    polyline_path(&[a, b])
}

/// Closed outline `v0 → v1 → v2 → v3 → v0`.
pub fn quadrilateral_path(q: &Quad) -> String {
    let mut out = polyline_path(&q.coords());
    out.push_str(" Z");
    out
}

/// Path for the diagonal `from`–`to`; the pair must be (0,2) or (1,3) in
/// either order.
pub fn diagonal_path(q: &Quad, from: VertexId, to: VertexId) -> Result<String> {
    if !from.is_diagonal_with(to) {
        return Err(GeomError::NotADiagonal {
            from: from.index(),
            to: to.index(),
        });
    }
    Ok(segment_path(q.coord(from), q.coord(to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::build_square;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(150.0), "150");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(1.23456), "1.235");
        assert_eq!(fmt_num(-7.1), "-7.1");
    }

    #[test]
    fn square_outline_and_diagonals() {
        let q = build_square(100.0, 200.0, 150.0, 0.0).unwrap();
        assert_eq!(
            quadrilateral_path(&q),
            "M 150 100 L 250 100 L 250 200 L 150 200 Z"
        );
        assert_eq!(
            diagonal_path(&q, VertexId::V1, VertexId::V3).unwrap(),
            "M 250 100 L 150 200"
        );
        assert_eq!(
            diagonal_path(&q, VertexId::V0, VertexId::V1),
            Err(GeomError::NotADiagonal { from: 0, to: 1 })
        );
        assert!(diagonal_path(&q, VertexId::V2, VertexId::V2).is_err());
    }
}
