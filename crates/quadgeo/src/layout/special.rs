//! Derived lines: altitudes, perpendicular bisectors, medians.
//!
//! A vertex-anchored line defaults to the side that starts at the opposite
//! vertex (`v+2 → v+3`). Any explicit side must not touch the anchor vertex.

use serde::{Deserialize, Serialize};

use crate::cfg::{GeomCfg, LayoutCfg};
use crate::error::{require_positive, GeomError, Result};
use crate::quad::util::{perp, unit};
use crate::quad::{Coord, Quad, SideId, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SpecialLineSpec {
    /// Perpendicular from `vertex` to the (extended) line of `side`.
    Altitude {
        vertex: VertexId,
        #[serde(default)]
        side: Option<SideId>,
    },
    /// Perpendicular through the midpoint of `side`; `length` defaults to
    /// `LayoutCfg::bisector_length`.
    PerpendicularBisector {
        side: SideId,
        #[serde(default)]
        length: Option<f64>,
    },
    /// `vertex` to the midpoint of `side`.
    Median {
        vertex: VertexId,
        #[serde(default)]
        side: Option<SideId>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialLineKind {
    Altitude,
    PerpendicularBisector,
    Median,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialLine {
    pub kind: SpecialLineKind,
    pub side: SideId,
    pub start: Coord,
    pub end: Coord,
    /// Foot of the altitude (equal to `end`); `None` for other kinds.
    pub foot: Option<Coord>,
    /// When the foot falls outside the side segment: the segment from the
    /// nearer side endpoint to the foot, drawn as an extension of the side.
    pub extension: Option<[Coord; 2]>,
}

impl SpecialLine {
    pub fn to_path(&self) -> String {
        super::path::segment_path(self.start, self.end)
    }
}

fn target_side(vertex: VertexId, side: Option<SideId>) -> Result<SideId> {
    let s = side.unwrap_or_else(|| SideId::starting_at(vertex.opposite()));
    let (a, b) = s.endpoints();
    if a == vertex || b == vertex {
        return Err(GeomError::invalid(
            "side",
            format!("side {s} touches anchor vertex {vertex}"),
        ));
    }
    Ok(s)
}

/// Endpoints of a special line. `Ok(None)` when the referenced side has zero
/// length, so no direction is defined.
pub fn special_line_endpoints(
    q: &Quad,
    spec: &SpecialLineSpec,
    layout: &LayoutCfg,
) -> Result<Option<SpecialLine>> {
    let eps = GeomCfg::default().eps_len;
    match *spec {
        SpecialLineSpec::Altitude { vertex, side } => {
            let s = target_side(vertex, side)?;
            let (a, b) = q.side(s);
            let ab = b - a;
            let len2 = ab.norm_squared();
            if len2 <= eps * eps {
                return Ok(None);
            }
            let p = q.vec(vertex);
            let t = (p - a).dot(&ab) / len2;
            let foot = Coord::from(a + ab * t);
            let tol = eps / len2.sqrt();
            let extension = if t < -tol {
                Some([Coord::from(a), foot])
            } else if t > 1.0 + tol {
                Some([Coord::from(b), foot])
            } else {
                None
            };
            Ok(Some(SpecialLine {
                kind: SpecialLineKind::Altitude,
                side: s,
                start: Coord::from(p),
                end: foot,
                foot: Some(foot),
                extension,
            }))
        }
        SpecialLineSpec::PerpendicularBisector { side, length } => {
            let length = require_positive("length", length.unwrap_or(layout.bisector_length))?;
            let (a, b) = q.side(side);
            let Some(d) = unit(b - a, eps) else {
                return Ok(None);
            };
            let mid = (a + b) * 0.5;
            let half = perp(d) * (length * 0.5);
            Ok(Some(SpecialLine {
                kind: SpecialLineKind::PerpendicularBisector,
                side,
                start: Coord::from(mid - half),
                end: Coord::from(mid + half),
                foot: None,
                extension: None,
            }))
        }
        SpecialLineSpec::Median { vertex, side } => {
            let s = target_side(vertex, side)?;
            let (a, b) = q.side(s);
            if (b - a).norm() <= eps {
                return Ok(None);
            }
            Ok(Some(SpecialLine {
                kind: SpecialLineKind::Median,
                side: s,
                start: q.coord(vertex),
                end: Coord::from((a + b) * 0.5),
                foot: None,
                extension: None,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::{build_square, build_trapezoid, distance, Placement};

    #[test]
    fn altitude_of_square_drops_to_the_bottom() {
        let q = build_square(100.0, 200.0, 150.0, 0.0).unwrap();
        let spec = SpecialLineSpec::Altitude {
            vertex: VertexId::V0,
            side: None,
        };
        let l = special_line_endpoints(&q, &spec, &LayoutCfg::default())
            .unwrap()
            .unwrap();
        assert_eq!(l.side, SideId::S2);
        assert_eq!(l.start, Coord::new(150.0, 100.0));
        assert_eq!(l.foot, Some(Coord::new(150.0, 200.0)));
        assert!(l.extension.is_none());
    }

    #[test]
    fn altitude_foot_may_leave_the_side() {
        // top base shifted right past the bottom-right corner
        let q = build_trapezoid(10.0, 6.0, 4.0, 5.0, Placement::new(0.0, 0.0, 0.0)).unwrap();
        let spec = SpecialLineSpec::Altitude {
            vertex: VertexId::V1,
            side: Some(SideId::S2),
        };
        let l = special_line_endpoints(&q, &spec, &LayoutCfg::default())
            .unwrap()
            .unwrap();
        assert_eq!(l.start, Coord::new(8.0, -2.0));
        assert_eq!(l.foot, Some(Coord::new(8.0, 2.0)));
        assert!((distance(l.start, l.end) - 4.0).abs() < 1e-12);
        assert_eq!(
            l.extension,
            Some([Coord::new(5.0, 2.0), Coord::new(8.0, 2.0)])
        );
    }

    #[test]
    fn median_and_bisector() {
        let q = build_square(100.0, 200.0, 150.0, 0.0).unwrap();
        let median = special_line_endpoints(
            &q,
            &SpecialLineSpec::Median {
                vertex: VertexId::V1,
                side: None,
            },
            &LayoutCfg::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(median.side, SideId::S3);
        assert_eq!(median.end, Coord::new(150.0, 150.0));

        let bis = special_line_endpoints(
            &q,
            &SpecialLineSpec::PerpendicularBisector {
                side: SideId::S0,
                length: Some(40.0),
            },
            &LayoutCfg::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(bis.start, Coord::new(200.0, 80.0));
        assert_eq!(bis.end, Coord::new(200.0, 120.0));
    }

    #[test]
    fn incident_side_is_rejected() {
        let q = build_square(100.0, 200.0, 150.0, 0.0).unwrap();
        let spec = SpecialLineSpec::Altitude {
            vertex: VertexId::V0,
            side: Some(SideId::S0),
        };
        assert!(matches!(
            special_line_endpoints(&q, &spec, &LayoutCfg::default()),
            Err(GeomError::InvalidParameter { name: "side", .. })
        ));
    }

    #[test]
    fn line_json_is_tagged() {
        let spec: SpecialLineSpec =
            serde_json::from_str(r#"{"kind":"perpendicular-bisector","side":2}"#).unwrap();
        assert_eq!(
            spec,
            SpecialLineSpec::PerpendicularBisector {
                side: SideId::S2,
                length: None
            }
        );
        assert!(serde_json::from_str::<SpecialLineSpec>(r#"{"kind":"median","vertex":7}"#).is_err());
    }
}
