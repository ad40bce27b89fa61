//! Tolerances and layout defaults.
//!
//! Policy
//! - Defaults are fixed constants; every predicate has a shorthand that uses
//!   `GeomCfg::default()` and a `_cfg` variant for callers that need to loosen
//!   or tighten the comparison (e.g. hand-entered student coordinates).
//! - Both config records are serde-friendly (camelCase) so the renderer can
//!   ship them as JSON next to the figure description.

use serde::{Deserialize, Serialize};

/// Absolute length tolerance (screen units) for "equal length" and "same point".
pub const EPS_LEN: f64 = 1e-6;
/// Tolerance in degrees for right-angle detection.
pub const EPS_ANGLE_DEG: f64 = 1e-4;
/// Tolerance on the sine between unit directions (parallel / perpendicular / collinear).
pub const EPS_CROSS: f64 = 1e-6;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeomCfg {
    pub eps_len: f64,
    pub eps_angle_deg: f64,
    pub eps_cross: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_len: EPS_LEN,
            eps_angle_deg: EPS_ANGLE_DEG,
            eps_cross: EPS_CROSS,
        }
    }
}

impl GeomCfg {
    /// Scale all tolerances by `factor` (> 0). Useful for coarse user input.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            eps_len: self.eps_len * factor,
            eps_angle_deg: self.eps_angle_deg * factor,
            eps_cross: self.eps_cross * factor,
        }
    }
}

/// Distances and sizes (screen units) used by the layout engine.
///
/// `padding` is larger than every label distance so that a view box built with
/// the default padding contains all labels placed at default offsets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutCfg {
    pub vertex_label_distance: f64,
    pub side_label_distance: f64,
    pub diagonal_label_distance: f64,
    pub angle_label_distance: f64,
    pub arc_radius: f64,
    pub right_angle_size: f64,
    pub tick_length: f64,
    pub tick_spacing: f64,
    pub bisector_length: f64,
    pub padding: f64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            vertex_label_distance: 20.0,
            side_label_distance: 15.0,
            diagonal_label_distance: 12.0,
            angle_label_distance: 38.0,
            arc_radius: 25.0,
            right_angle_size: 12.0,
            tick_length: 10.0,
            tick_spacing: 5.0,
            bisector_length: 80.0,
            padding: 40.0,
        }
    }
}
