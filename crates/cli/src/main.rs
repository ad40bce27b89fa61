use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quadgeo::layout::{compose_figure, FigureCfg};
use quadgeo::quad::{analyze_quadrilateral_cfg, build_from_kind, Point, Quad, QuadKind};
use quadgeo::rand::{draw_quad, RandomQuadCfg, ReplayToken};
use quadgeo::{GeomCfg, LayoutCfg};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Quadrilateral analysis and figure layout")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Where the quadrilateral comes from.
#[derive(Args, Debug)]
struct ShapeArgs {
    /// Canonical shape by kind name (aliases accepted)
    #[arg(long, conflicts_with = "points")]
    kind: Option<String>,
    /// Explicit vertices `x0,y0,x1,y1,x2,y2,x3,y3`
    #[arg(long, allow_hyphen_values = true)]
    points: Option<String>,
}

impl ShapeArgs {
    fn resolve(&self) -> Result<Quad> {
        match (&self.kind, &self.points) {
            (_, Some(p)) => parse_points(p),
            (Some(k), None) => Ok(build_from_kind(k.parse()?)),
            (None, None) => Ok(build_from_kind(QuadKind::Square)),
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Compose a figure (JSON) and write it with a provenance sidecar
    Figure {
        #[command(flatten)]
        shape: ShapeArgs,
        /// FigureCfg JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// LayoutCfg JSON file
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Output path; stdout when omitted (no sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the property report as JSON
    Analyze {
        #[command(flatten)]
        shape: ShapeArgs,
        /// Multiply all tolerances (coarse hand-entered input)
        #[arg(long, default_value_t = 1.0)]
        tolerance_scale: f64,
    },
    /// List registered kinds with their default colors
    Kinds,
    /// Draw a reproducible random quadrilateral of a kind
    Sample {
        #[arg(long)]
        kind: String,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Random rotation about the center
        #[arg(long)]
        rotate: bool,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let text = match cmd.action {
        Action::Figure {
            shape,
            config,
            layout,
            out,
        } => figure(&shape, config.as_deref(), layout.as_deref(), out.as_deref())?,
        Action::Analyze {
            shape,
            tolerance_scale,
        } => analyze(&shape, tolerance_scale)?,
        Action::Kinds => kinds(),
        Action::Sample {
            kind,
            seed,
            index,
            rotate,
        } => sample(&kind, seed, index, rotate)?,
    };
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

fn parse_points(s: &str) -> Result<Quad> {
    let nums = s
        .split(',')
        .map(|t| {
            t.trim()
                .parse::<f64>()
                .with_context(|| format!("bad coordinate {t:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if nums.len() % 2 != 0 {
        bail!("odd number of coordinates ({})", nums.len());
    }
    let pts = nums
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect();
    Ok(Quad::from_points(pts)?.with_default_labels())
}

fn read_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        None => Ok(T::default()),
        Some(p) => {
            let raw = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            serde_json::from_slice(&raw).with_context(|| format!("parsing {}", p.display()))
        }
    }
}

/// Returns the text for stdout: the figure itself, or nothing when written
/// to `out`.
fn figure(
    shape: &ShapeArgs,
    config: Option<&Path>,
    layout: Option<&Path>,
    out: Option<&Path>,
) -> Result<String> {
    let q = shape.resolve()?;
    let cfg: FigureCfg = read_json(config)?;
    let layout_cfg: LayoutCfg = read_json(layout)?;
    let fig = compose_figure(&q, &cfg, &layout_cfg)?;
    tracing::info!(kind = %fig.report.kind, out = ?out, "figure");
    let body = serde_json::to_string_pretty(&fig)?;
    let Some(out) = out else {
        return Ok(body);
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, &body).with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(
        out,
        json!({
            "kind": shape.kind,
            "points": shape.points,
            "config": config.map(|p| p.display().to_string()),
            "layout": layout_cfg,
        }),
    )?;
    tracing::info!(sidecar = %sidecar.display(), "provenance written");
    Ok(String::new())
}

fn analyze(shape: &ShapeArgs, tolerance_scale: f64) -> Result<String> {
    if !(tolerance_scale.is_finite() && tolerance_scale > 0.0) {
        bail!("--tolerance-scale must be a positive number, got {tolerance_scale}");
    }
    let q = shape.resolve()?;
    let report = analyze_quadrilateral_cfg(&q, GeomCfg::default().scaled(tolerance_scale));
    tracing::info!(kind = %report.kind, "analyze");
    Ok(serde_json::to_string_pretty(&report)?)
}

fn kinds() -> String {
    QuadKind::ALL
        .iter()
        .map(|k| {
            format!(
                "{:<14} fill={} stroke={}",
                k.as_str(),
                k.default_fill(),
                k.default_stroke()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sample(kind: &str, seed: u64, index: u64, rotate: bool) -> Result<String> {
    let kind: QuadKind = kind.parse()?;
    let cfg = RandomQuadCfg {
        random_rotation: rotate,
        ..RandomQuadCfg::default()
    };
    let q = draw_quad(kind, cfg, ReplayToken::new(seed, index))?;
    tracing::info!(%kind, seed, index, "sample");
    Ok(serde_json::to_string_pretty(&q)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn shape(kind: Option<&str>, points: Option<&str>) -> ShapeArgs {
        ShapeArgs {
            kind: kind.map(str::to_string),
            points: points.map(str::to_string),
        }
    }

    #[test]
    fn points_parse_into_a_labeled_quad() {
        let q = parse_points("0,0, 10,0, 10,10, 0,10").unwrap();
        assert_eq!(q.points()[2].label.as_deref(), Some("C"));
        assert!(parse_points("0,0,1,1,2").is_err());
        assert!(parse_points("0,0,1,1,2,2").is_err());
        assert!(parse_points("0,0,1,x,2,2,3,3").is_err());
    }

    #[test]
    fn analyze_prints_report_json() {
        let text = analyze(&shape(Some("bowtie"), None), 1.0).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["kind"], "crossed");
        assert_eq!(v["isSelfIntersecting"], true);
        assert!(analyze(&shape(Some("hexagon"), None), 1.0).is_err());
        assert!(analyze(&shape(None, None), 0.0).is_err());
    }

    #[test]
    fn figure_writes_output_and_sidecar() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("cfg.json");
        std::fs::write(&cfg_path, r#"{"diagonals":[{"from":0,"to":2,"bisectionMarks":1}]}"#)
            .unwrap();
        let out = dir.path().join("figs/rect.json");
        let text = figure(
            &shape(Some("rectangle"), None),
            Some(&cfg_path),
            None,
            Some(&out),
        )
        .unwrap();
        assert!(text.is_empty());
        let fig: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(fig["report"]["kind"], "rectangle");
        assert_eq!(fig["diagonals"][0]["bisectionTicks"].as_array().unwrap().len(), 2);
        assert!(dir.path().join("figs/rect.provenance.json").exists());
    }

    #[test]
    fn sample_is_reproducible() {
        let a = sample("kite", 3, 1, true).unwrap();
        let b = sample("kite", 3, 1, true).unwrap();
        assert_eq!(a, b);
        assert!(kinds().lines().count() == QuadKind::ALL.len());
    }
}
