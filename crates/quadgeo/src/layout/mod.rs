//! Layout engine: geometric facts to renderer-agnostic drawing instructions.
//!
//! Purpose
//! - Compute where things go (view box, labels, arcs, markers, ticks,
//!   special lines) and the path strings the renderer draws verbatim.
//! - Never draw. Output is plain data (serde `Serialize`, camelCase).
//!
//! Conventions
//! - Screen coordinates, y grows downward. Positive angles turn clockwise on
//!   screen; SVG `sweep = 1` arcs run the same way.
//! - "Outward" is measured against the vertex average (`quad::centroid`).
//!
//! Code cross-refs: `crate::quad::QuadReport`, `crate::cfg::LayoutCfg`.

mod figure;
mod labels;
mod marks;
mod path;
mod special;
mod style;

pub use figure::{
    compose_figure, AngleConfig, AngleDrawing, DiagonalConfig, DiagonalDrawing, Figure,
    FigureCfg, SideConfig, SideDrawing, SpecialLineConfig, SpecialLineDrawing, VertexLabel,
};
pub use labels::{
    angle_label_position, calculate_view_box, diagonal_label_position, side_label_position,
    side_outward_normal, vertex_label_position, ViewBox,
};
pub use marks::{
    describe_angle_arc, describe_angle_arc_span, describe_equal_marks, describe_parallel_marks,
    describe_right_angle_marker, format_degrees, ArcDesc, ArcSpan, MarkKind, Marks,
    RightAngleMarker, Tick,
};
pub use path::{diagonal_path, polyline_path, quadrilateral_path, segment_path};
pub use special::{special_line_endpoints, SpecialLine, SpecialLineKind, SpecialLineSpec};
pub use style::{stroke_dash_array, LineStyle, ShapeStyle};

#[cfg(test)]
mod tests;
