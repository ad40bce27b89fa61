//! Stroke patterns and the per-kind default palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeomError;
use crate::quad::QuadKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Value for a `stroke-dasharray` attribute.
    pub const fn dash_array(self) -> &'static str {
        match self {
            LineStyle::Solid => "none",
            LineStyle::Dashed => "5,5",
            LineStyle::Dotted => "2,4",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

#[inline]
pub fn stroke_dash_array(style: LineStyle) -> &'static str {
    style.dash_array()
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineStyle {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(LineStyle::Solid),
            "dashed" | "dash" => Ok(LineStyle::Dashed),
            "dotted" | "dot" => Ok(LineStyle::Dotted),
            _ => Err(GeomError::invalid(
                "style",
                format!("unknown line style {s:?}"),
            )),
        }
    }
}

/// Fill and outline for the quadrilateral body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub fill_opacity: f64,
    pub stroke_dash_array: &'static str,
}

impl QuadKind {
    pub const fn default_fill(self) -> &'static str {
        match self {
            QuadKind::Square => "#dbeafe",
            QuadKind::Rectangle => "#dcfce7",
            QuadKind::Rhombus => "#fef3c7",
            QuadKind::Parallelogram => "#ede9fe",
            QuadKind::Trapezoid => "#fce7f3",
            QuadKind::Kite => "#ccfbf1",
            QuadKind::Concave => "#ffedd5",
            QuadKind::Generic => "#f3f4f6",
            QuadKind::Crossed => "#fee2e2",
        }
    }

    pub const fn default_stroke(self) -> &'static str {
        match self {
            QuadKind::Square => "#2563eb",
            QuadKind::Rectangle => "#16a34a",
            QuadKind::Rhombus => "#d97706",
            QuadKind::Parallelogram => "#7c3aed",
            QuadKind::Trapezoid => "#db2777",
            QuadKind::Kite => "#0d9488",
            QuadKind::Concave => "#ea580c",
            QuadKind::Generic => "#374151",
            QuadKind::Crossed => "#dc2626",
        }
    }

    /// Complete body style. Crossed shapes get a fainter fill and a dashed
    /// outline so the overlap reads as an error state.
    pub const fn style(self) -> ShapeStyle {
        let crossed = matches!(self, QuadKind::Crossed);
        ShapeStyle {
            fill: self.default_fill(),
            stroke: self.default_stroke(),
            fill_opacity: if crossed { 0.25 } else { 0.5 },
            stroke_dash_array: if crossed {
                LineStyle::Dashed.dash_array()
            } else {
                LineStyle::Solid.dash_array()
            },
        }
    }
}
