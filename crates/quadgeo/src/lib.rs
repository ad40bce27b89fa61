//! Quadrilateral geometry engine for diagram rendering.
//!
//! Layers
//! - `quad`: vertex types, builders, predicates, diagonal analysis and the
//!   aggregate `QuadReport`.
//! - `layout`: view box, label positions, arcs, markers, ticks, special
//!   lines and full figure composition.
//! - `rand`: reproducible random instances per kind.
//!
//! Policy
//! - Stateless and I/O free. Every function is pure and safe to call from
//!   many threads at once.
//! - Invalid input (non-positive sizes, out-of-range indices, non-diagonal
//!   pairs) is a `GeomError`. Degenerate geometry (parallel diagonals,
//!   zero-length sides) is `None`.

pub mod cfg;
pub mod error;
pub mod layout;
pub mod quad;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{GeomCfg, LayoutCfg};
pub use error::{GeomError, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{GeomCfg, LayoutCfg};
    pub use crate::error::{GeomError, Result};
    pub use crate::layout::{compose_figure, Figure, FigureCfg};
    pub use crate::quad::{
        analyze_quadrilateral, build_from_kind, classify, Coord, Placement, Point, Quad,
        QuadKind, QuadReport, SideId, VertexId,
    };
    pub use crate::rand::{draw_quad, RandomQuadCfg, ReplayToken};
}
