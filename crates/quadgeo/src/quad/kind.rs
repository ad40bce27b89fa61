//! Named quadrilateral kinds (closed registry).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeomError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuadKind {
    Square,
    Rectangle,
    Rhombus,
    Parallelogram,
    Trapezoid,
    Kite,
    /// Simple, non-convex (one reflex vertex).
    Concave,
    /// Simple, convex, none of the above.
    Generic,
    /// Self-intersecting ("bowtie").
    Crossed,
}

impl QuadKind {
    pub const ALL: [QuadKind; 9] = [
        QuadKind::Square,
        QuadKind::Rectangle,
        QuadKind::Rhombus,
        QuadKind::Parallelogram,
        QuadKind::Trapezoid,
        QuadKind::Kite,
        QuadKind::Concave,
        QuadKind::Generic,
        QuadKind::Crossed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuadKind::Square => "square",
            QuadKind::Rectangle => "rectangle",
            QuadKind::Rhombus => "rhombus",
            QuadKind::Parallelogram => "parallelogram",
            QuadKind::Trapezoid => "trapezoid",
            QuadKind::Kite => "kite",
            QuadKind::Concave => "concave",
            QuadKind::Generic => "generic",
            QuadKind::Crossed => "crossed",
        }
    }

    /// Both pairs of opposite sides parallel.
    pub fn is_parallelogram_family(self) -> bool {
        matches!(
            self,
            QuadKind::Square | QuadKind::Rectangle | QuadKind::Rhombus | QuadKind::Parallelogram
        )
    }
}

impl fmt::Display for QuadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuadKind {
    type Err = GeomError;

    /// Case-insensitive; accepts a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let kind = match key.as_str() {
            "square" => QuadKind::Square,
            "rectangle" | "rect" => QuadKind::Rectangle,
            "rhombus" | "diamond" => QuadKind::Rhombus,
            "parallelogram" => QuadKind::Parallelogram,
            "trapezoid" | "trapezium" => QuadKind::Trapezoid,
            "kite" => QuadKind::Kite,
            "concave" | "dart" | "arrowhead" => QuadKind::Concave,
            "generic" | "convex" | "irregular" | "quadrilateral" => QuadKind::Generic,
            "crossed" | "self-intersecting" | "bowtie" | "complex" => QuadKind::Crossed,
            _ => return Err(GeomError::UnknownKind(s.to_string())),
        };
        Ok(kind)
    }
}
