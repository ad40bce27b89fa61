//! Quadrilateral geometry: construction, predicates, diagonals, analysis.
//!
//! Purpose
//! - Pure functions over an ordered 4-vertex cycle (`Quad`). No shared state;
//!   everything here is safe to call from any number of threads.
//! - Facts (parallelism, equal sides, right angles, crossing) depend only on
//!   the vertex coordinates and a `GeomCfg` of tolerances.
//!
//! Layout
//! - `types`: `Coord`, `Point`, `VertexId`, `SideId`, `Quad`.
//! - `build`: square/rectangle/… builders and the named-kind registry.
//! - `predicates`: measures, angles, parallel/equal/right-angle detection,
//!   segment intersection, convexity, self-intersection.
//! - `diagonals`: diagonal intersection and bisect/equal/perpendicular tests.
//! - `analyze`: `QuadReport`, the aggregate consumed by the layout engine.
//!
//! Code cross-refs: `crate::layout` (drawing primitives), `crate::cfg::GeomCfg`.

mod analyze;
mod build;
mod diagonals;
mod kind;
mod predicates;
mod types;
pub(crate) mod util;

pub use analyze::{
    analyze_quadrilateral, analyze_quadrilateral_cfg, classify, DiagonalReport, QuadReport,
};
pub use build::{
    build_dart, build_from_kind, build_from_name, build_from_offsets, build_kite,
    build_parallelogram, build_rectangle, build_rhombus, build_square, build_trapezoid, Placement,
    RectangleConfig, RectangleSpec, SquareConfig, SquareSpec, DEFAULT_CENTER,
};
pub use diagonals::{
    diagonal_intersection, diagonal_intersection_cfg, diagonal_lengths, diagonals_are_equal,
    diagonals_are_equal_cfg, diagonals_are_perpendicular, diagonals_are_perpendicular_cfg,
    diagonals_bisect_each_other, diagonals_bisect_each_other_cfg,
};
pub use kind::QuadKind;
pub use predicates::{
    angle_at_vertex, angle_at_vertex_cfg, angles, angles_cfg, area, centroid, concave_vertex,
    concave_vertex_cfg, detect_equal_sides, detect_equal_sides_cfg, detect_parallel_sides,
    detect_parallel_sides_cfg, detect_right_angles, detect_right_angles_cfg, distance,
    is_convex, is_convex_cfg, is_self_intersecting, is_self_intersecting_cfg, midpoint,
    perimeter, segment_intersection, segments_intersect, side_length, side_lengths, signed_area,
};
pub use types::{Coord, LabelOffset, Point, Quad, SideId, VertexId};
