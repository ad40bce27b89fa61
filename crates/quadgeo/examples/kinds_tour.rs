//! Print every registered kind with its canonical shape's key facts, then a
//! few seeded random draws.
//!
//! Usage:
//!   cargo run -p quadgeo --example kinds_tour
//!   cargo run -p quadgeo --example kinds_tour -- random 2025

use quadgeo::layout::format_degrees;
use quadgeo::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("canonical") => show_canonical(),
        Some("random") => {
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
            show_random(seed);
        }
        Some(_) => eprintln!("usage: kinds_tour [canonical|random [seed]]"),
    }
}

fn angle_text(r: &QuadReport) -> String {
    r.angles
        .iter()
        .map(|a| a.map_or_else(|| "-".to_string(), format_degrees))
        .collect::<Vec<_>>()
        .join(" ")
}

fn show_canonical() {
    for kind in QuadKind::ALL {
        let r = analyze_quadrilateral(&build_from_kind(kind));
        println!(
            "{:<14} convex={:<5} crossed={:<5} right={:?} parallel={} area={:.1} angles=[{}]",
            kind.as_str(),
            r.is_convex,
            r.is_self_intersecting,
            r.right_angle_vertices
                .iter()
                .map(|v| v.index())
                .collect::<Vec<_>>(),
            r.parallel_pairs.len(),
            r.area(),
            angle_text(&r),
        );
    }
}

fn show_random(seed: u64) {
    let cfg = RandomQuadCfg {
        random_rotation: true,
        ..RandomQuadCfg::default()
    };
    for kind in QuadKind::ALL {
        for index in 0..3 {
            match draw_quad(kind, cfg, ReplayToken::new(seed, index)) {
                Ok(q) => {
                    let r = analyze_quadrilateral(&q);
                    println!(
                        "{kind} #{index}: perimeter={:.1} angles=[{}]",
                        r.perimeter,
                        angle_text(&r)
                    );
                }
                Err(e) => eprintln!("{kind} #{index}: {e}"),
            }
        }
    }
}
