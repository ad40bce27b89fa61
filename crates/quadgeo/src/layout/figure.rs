//! Figure composition: per-element configs plus a quad in, one serializable
//! bundle of drawing primitives out.
//!
//! The `QuadReport` is computed once here and carried in the figure; style
//! and automatic right-angle markers read from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::labels::{
    angle_label_position, calculate_view_box, diagonal_label_position, side_label_position,
    vertex_label_position, ViewBox,
};
use super::marks::{
    describe_angle_arc_span, describe_equal_marks, describe_parallel_marks,
    describe_right_angle_marker, format_degrees, ticks_on_segment, ArcDesc, ArcSpan, Marks,
    RightAngleMarker, Tick,
};
use super::path::{diagonal_path, quadrilateral_path};
use super::special::{special_line_endpoints, SpecialLine, SpecialLineSpec};
use super::style::{LineStyle, ShapeStyle};
use crate::cfg::{GeomCfg, LayoutCfg};
use crate::error::{require_finite, require_positive, Result};
use crate::quad::util::unit;
use crate::quad::{
    analyze_quadrilateral, segment_intersection, Coord, Quad, QuadReport, SideId, VertexId,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SideConfig {
    pub side: SideId,
    pub label: Option<String>,
    pub parallel_marks: usize,
    pub equal_marks: usize,
    pub color: Option<String>,
    pub style: LineStyle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AngleConfig {
    pub vertex: VertexId,
    pub show_arc: bool,
    pub show_degrees: bool,
    pub right_angle: bool,
    pub color: Option<String>,
    pub radius: Option<f64>,
    /// Draw the reflex side when the interior angle exceeds 180°.
    pub reflex: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagonalConfig {
    pub from: VertexId,
    pub to: VertexId,
    #[serde(default)]
    pub bisection_marks: usize,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "dashed")]
    pub style: LineStyle,
    #[serde(default)]
    pub label: Option<String>,
}

fn dashed() -> LineStyle {
    LineStyle::Dashed
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialLineConfig {
    #[serde(flatten)]
    pub line: SpecialLineSpec,
    #[serde(default = "dashed")]
    pub style: LineStyle,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// What to draw on top of the outline. Everything is opt-in except vertex
/// labels and automatic right-angle markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FigureCfg {
    pub sides: Vec<SideConfig>,
    pub angles: Vec<AngleConfig>,
    pub diagonals: Vec<DiagonalConfig>,
    pub special_lines: Vec<SpecialLineConfig>,
    pub show_vertex_labels: bool,
    /// Add a right-angle marker at every vertex the report lists, unless an
    /// angle config for that vertex already covers it.
    pub auto_right_angles: bool,
    /// Overrides `LayoutCfg::padding`.
    pub padding: Option<f64>,
}

impl Default for FigureCfg {
    fn default() -> Self {
        Self {
            sides: Vec::new(),
            angles: Vec::new(),
            diagonals: Vec::new(),
            special_lines: Vec::new(),
            show_vertex_labels: true,
            auto_right_angles: true,
            padding: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexLabel {
    pub vertex: VertexId,
    pub text: String,
    pub position: Coord,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideDrawing {
    pub side: SideId,
    pub style: LineStyle,
    pub color: Option<String>,
    pub label: Option<String>,
    pub label_position: Option<Coord>,
    pub marks: Vec<Marks>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleDrawing {
    pub vertex: VertexId,
    pub color: Option<String>,
    pub arc: Option<ArcDesc>,
    pub marker: Option<RightAngleMarker>,
    pub degrees: Option<f64>,
    pub degree_text: Option<String>,
    pub label_position: Option<Coord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagonalDrawing {
    pub from: VertexId,
    pub to: VertexId,
    pub path: String,
    pub style: LineStyle,
    pub color: Option<String>,
    pub label: Option<String>,
    pub label_position: Option<Coord>,
    /// Ticks on each half, split at the diagonal intersection.
    pub bisection_ticks: Vec<Tick>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialLineDrawing {
    #[serde(flatten)]
    pub line: SpecialLine,
    pub style: LineStyle,
    pub color: Option<String>,
    pub label: Option<String>,
    /// Square marker at the altitude foot.
    pub foot_marker: Option<[Coord; 3]>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub view_box: ViewBox,
    pub outline: String,
    pub style: ShapeStyle,
    pub report: QuadReport,
    pub vertex_labels: Vec<VertexLabel>,
    pub sides: Vec<SideDrawing>,
    pub angles: Vec<AngleDrawing>,
    pub diagonals: Vec<DiagonalDrawing>,
    pub special_lines: Vec<SpecialLineDrawing>,
}

fn angle_drawing(
    q: &Quad,
    report: &QuadReport,
    cfg: &AngleConfig,
    layout: &LayoutCfg,
) -> Result<AngleDrawing> {
    let v = cfg.vertex;
    let radius = match cfg.radius {
        Some(r) => require_positive("radius", r)?,
        None => layout.arc_radius,
    };
    let degrees = report.angles[v.index()];
    let marker = if cfg.right_angle {
        describe_right_angle_marker(q, v, layout.right_angle_size)
    } else {
        None
    };
    let span = if cfg.reflex {
        ArcSpan::Interior
    } else {
        ArcSpan::Minor
    };
    let arc = if cfg.show_arc && marker.is_none() {
        describe_angle_arc_span(q, v, radius, span)
    } else {
        None
    };
    let (degree_text, label_position) = match (cfg.show_degrees, degrees) {
        (true, Some(d)) => (
            Some(format_degrees(d)),
            angle_label_position(q, v, layout.angle_label_distance),
        ),
        _ => (None, None),
    };
    Ok(AngleDrawing {
        vertex: v,
        color: cfg.color.clone(),
        arc,
        marker,
        degrees,
        degree_text,
        label_position,
    })
}

fn diagonal_drawing(q: &Quad, cfg: &DiagonalConfig, layout: &LayoutCfg) -> Result<DiagonalDrawing> {
    let path = diagonal_path(q, cfg.from, cfg.to)?;
    let label_position = match cfg.label {
        Some(_) => diagonal_label_position(q, cfg.from, cfg.to, layout.diagonal_label_distance)?,
        None => None,
    };
    let mut bisection_ticks = Vec::new();
    if cfg.bisection_marks > 0 {
        let (from, to) = (q.coord(cfg.from), q.coord(cfg.to));
        let (c, d) = (q.coord(cfg.from.next()), q.coord(cfg.from.prev()));
        // only diagonals that actually cross; a concave quad meets on an extension
        match segment_intersection(from, to, c, d, GeomCfg::default()) {
            Some(x) => {
                for (a, b) in [(from, x), (x, to)] {
                    bisection_ticks.extend(
                        ticks_on_segment(
                            a.vec(),
                            b.vec(),
                            cfg.bisection_marks,
                            layout.tick_spacing,
                            layout.tick_length,
                        )
                        .into_iter()
                        .flatten(),
                    );
                }
            }
            None => debug!(
                from = cfg.from.index(),
                to = cfg.to.index(),
                "diagonals do not cross; no bisection ticks"
            ),
        }
    }
    Ok(DiagonalDrawing {
        from: cfg.from,
        to: cfg.to,
        path,
        style: cfg.style,
        color: cfg.color.clone(),
        label: cfg.label.clone(),
        label_position,
        bisection_ticks,
    })
}

fn side_drawing(q: &Quad, cfg: &SideConfig, layout: &LayoutCfg) -> SideDrawing {
    let s = cfg.side;
    let label_position = cfg
        .label
        .as_ref()
        .and_then(|_| side_label_position(q, s, layout.side_label_distance));
    let mut marks = Vec::new();
    if cfg.parallel_marks > 0 {
        marks.extend(describe_parallel_marks(
            q,
            s,
            cfg.parallel_marks,
            layout.tick_spacing,
            layout.tick_length,
        ));
    }
    if cfg.equal_marks > 0 {
        marks.extend(describe_equal_marks(
            q,
            s,
            cfg.equal_marks,
            layout.tick_spacing,
            layout.tick_length,
        ));
    }
    SideDrawing {
        side: s,
        style: cfg.style,
        color: cfg.color.clone(),
        label: cfg.label.clone(),
        label_position,
        marks,
    }
}

fn foot_marker(q: &Quad, line: &SpecialLine, size: f64) -> Option<[Coord; 3]> {
    let eps = GeomCfg::default().eps_len;
    let foot = line.foot?.vec();
    let up = unit(line.start.vec() - foot, eps)?;
    let (a, b) = q.side(line.side);
    let along = unit(b - a, eps)?;
    // lean the marker toward the side's interior half
    let along = if (0.5 * (a + b) - foot).dot(&along) < 0.0 {
        -along
    } else {
        along
    };
    Some([
        Coord::from(foot + up * size),
        Coord::from(foot + (up + along) * size),
        Coord::from(foot + along * size),
    ])
}

/// Compose a full figure. Per-element errors (bad diagonal pair, invalid
/// radius, special line on an incident side) abort the whole figure.
pub fn compose_figure(q: &Quad, cfg: &FigureCfg, layout: &LayoutCfg) -> Result<Figure> {
    let padding = match cfg.padding {
        Some(p) => require_finite("padding", p)?,
        None => layout.padding,
    };
    let report = analyze_quadrilateral(q);
    let view_box = calculate_view_box(q, padding)?;

    let vertex_labels = if cfg.show_vertex_labels {
        VertexId::ALL
            .iter()
            .map(|&v| VertexLabel {
                vertex: v,
                text: q[v]
                    .label
                    .clone()
                    .unwrap_or_else(|| char::from(b'A' + v.index() as u8).to_string()),
                position: vertex_label_position(q, v, layout.vertex_label_distance),
            })
            .collect()
    } else {
        Vec::new()
    };

    let sides = cfg
        .sides
        .iter()
        .map(|s| side_drawing(q, s, layout))
        .collect();

    let mut angles = cfg
        .angles
        .iter()
        .map(|a| angle_drawing(q, &report, a, layout))
        .collect::<Result<Vec<_>>>()?;
    if cfg.auto_right_angles {
        for &v in &report.right_angle_vertices {
            if cfg.angles.iter().any(|a| a.vertex == v) {
                continue;
            }
            let auto = AngleConfig {
                vertex: v,
                right_angle: true,
                ..AngleConfig::default()
            };
            angles.push(angle_drawing(q, &report, &auto, layout)?);
        }
    }

    let diagonals = cfg
        .diagonals
        .iter()
        .map(|d| diagonal_drawing(q, d, layout))
        .collect::<Result<Vec<_>>>()?;

    let mut special_lines = Vec::with_capacity(cfg.special_lines.len());
    for sl in &cfg.special_lines {
        let Some(line) = special_line_endpoints(q, &sl.line, layout)? else {
            debug!(spec = ?sl.line, "special line skipped: zero-length side");
            continue;
        };
        special_lines.push(SpecialLineDrawing {
            foot_marker: foot_marker(q, &line, layout.right_angle_size),
            line,
            style: sl.style,
            color: sl.color.clone(),
            label: sl.label.clone(),
        });
    }

    debug!(
        kind = %report.kind,
        sides = cfg.sides.len(),
        angles = angles.len(),
        diagonals = diagonals.len(),
        special = special_lines.len(),
        "figure composed"
    );
    Ok(Figure {
        view_box,
        outline: quadrilateral_path(q),
        style: report.kind.style(),
        report,
        vertex_labels,
        sides,
        angles,
        diagonals,
        special_lines,
    })
}

impl Figure {
    /// Every label anchor in the figure, for bounds checks.
    pub fn label_positions(&self) -> Vec<Coord> {
        let mut out: Vec<Coord> = self.vertex_labels.iter().map(|l| l.position).collect();
        out.extend(self.sides.iter().filter_map(|s| s.label_position));
        out.extend(self.angles.iter().filter_map(|a| a.label_position));
        out.extend(self.diagonals.iter().filter_map(|d| d.label_position));
        out
    }
}
