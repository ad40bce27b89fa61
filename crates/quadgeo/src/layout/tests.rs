use super::*;
use crate::cfg::LayoutCfg;
use crate::error::GeomError;
use crate::quad::{
    build_from_kind, build_square, build_trapezoid, distance, Coord, Placement, Quad, QuadKind,
    SideId, VertexId,
};
use proptest::prelude::*;

fn square() -> Quad {
    build_square(100.0, 200.0, 150.0, 0.0).unwrap()
}

#[test]
fn default_figure_of_a_square() {
    let fig = compose_figure(&square(), &FigureCfg::default(), &LayoutCfg::default()).unwrap();
    assert_eq!(fig.outline, "M 150 100 L 250 100 L 250 200 L 150 200 Z");
    assert_eq!(fig.view_box.to_attr(), "110 60 180 180");
    assert_eq!(fig.report.kind, QuadKind::Square);
    assert_eq!(fig.style, QuadKind::Square.style());
    let texts: Vec<_> = fig.vertex_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["A", "B", "C", "D"]);
    // one automatic marker per right angle, no arcs
    assert_eq!(fig.angles.len(), 4);
    assert!(fig.angles.iter().all(|a| a.marker.is_some() && a.arc.is_none()));
}

#[test]
fn explicit_angle_config_replaces_the_auto_marker() {
    let cfg = FigureCfg {
        angles: vec![AngleConfig {
            vertex: VertexId::V0,
            show_arc: true,
            show_degrees: true,
            ..AngleConfig::default()
        }],
        ..FigureCfg::default()
    };
    let fig = compose_figure(&square(), &cfg, &LayoutCfg::default()).unwrap();
    assert_eq!(fig.angles.len(), 4);
    let a0 = &fig.angles[0];
    assert_eq!(a0.vertex, VertexId::V0);
    assert!(a0.arc.is_some() && a0.marker.is_none());
    assert_eq!(a0.degree_text.as_deref(), Some("90°"));
    assert!(fig.angles[1..].iter().all(|a| a.vertex != VertexId::V0));
}

#[test]
fn trapezoid_sides_get_parallel_ticks() {
    let q = build_trapezoid(200.0, 110.0, 100.0, 0.0, Placement::default()).unwrap();
    let cfg = FigureCfg {
        sides: [SideId::S0, SideId::S2]
            .into_iter()
            .map(|side| SideConfig {
                side,
                parallel_marks: 1,
                label: Some(format!("s{side}")),
                ..SideConfig::default()
            })
            .collect(),
        ..FigureCfg::default()
    };
    let layout = LayoutCfg::default();
    let fig = compose_figure(&q, &cfg, &layout).unwrap();
    assert_eq!(fig.report.parallel_pairs, vec![(SideId::S0, SideId::S2)]);
    for side in &fig.sides {
        assert_eq!(side.marks.len(), 1);
        assert_eq!(side.marks[0].kind, MarkKind::Parallel);
        let tick = side.marks[0].ticks[0];
        assert!((distance(tick.start, tick.end) - layout.tick_length).abs() < 1e-9);
        assert!(side.label_position.is_some());
    }
}

#[test]
fn diagonal_bisection_ticks_split_at_the_intersection() {
    let cfg = FigureCfg {
        diagonals: vec![DiagonalConfig {
            from: VertexId::V0,
            to: VertexId::V2,
            bisection_marks: 2,
            color: None,
            style: LineStyle::Dashed,
            label: Some("d".into()),
        }],
        ..FigureCfg::default()
    };
    let fig = compose_figure(&square(), &cfg, &LayoutCfg::default()).unwrap();
    let d = &fig.diagonals[0];
    assert_eq!(d.path, "M 150 100 L 250 200");
    assert_eq!(d.bisection_ticks.len(), 4);
    let center = Coord::new(200.0, 150.0);
    for t in &d.bisection_ticks[..2] {
        let mid = Coord::new((t.start.x + t.end.x) / 2.0, (t.start.y + t.end.y) / 2.0);
        assert!(mid.x < center.x && mid.y < center.y);
    }
    assert!(d.label_position.is_some());

    let bad = FigureCfg {
        diagonals: vec![DiagonalConfig {
            to: VertexId::V1,
            ..cfg.diagonals[0].clone()
        }],
        ..FigureCfg::default()
    };
    assert_eq!(
        compose_figure(&square(), &bad, &LayoutCfg::default()),
        Err(GeomError::NotADiagonal { from: 0, to: 1 })
    );
}

#[test]
fn concave_diagonals_get_no_bisection_ticks() {
    let q = build_from_kind(QuadKind::Concave);
    let diagonal = |from, to| DiagonalConfig {
        from,
        to,
        bisection_marks: 1,
        color: None,
        style: LineStyle::Dashed,
        label: None,
    };
    let cfg = FigureCfg {
        diagonals: vec![diagonal(VertexId::V0, VertexId::V2), diagonal(VertexId::V1, VertexId::V3)],
        ..FigureCfg::default()
    };
    let fig = compose_figure(&q, &cfg, &LayoutCfg::default()).unwrap();
    // the diagonal lines meet below the notch, past the end of v0-v2
    let x = fig.report.diagonals.intersection.unwrap();
    assert!(x.y > q.coord(VertexId::V2).y);
    assert!(fig.diagonals.iter().all(|d| d.bisection_ticks.is_empty()));
}

#[test]
fn figure_config_from_json() {
    let cfg: FigureCfg = serde_json::from_str(
        r#"{
            "showVertexLabels": false,
            "specialLines": [{"kind": "altitude", "vertex": 0, "color": "red"}],
            "diagonals": [{"from": 1, "to": 3}]
        }"#,
    )
    .unwrap();
    assert!(cfg.auto_right_angles);
    assert_eq!(cfg.diagonals[0].style, LineStyle::Dashed);
    assert_eq!(cfg.special_lines[0].style, LineStyle::Dashed);

    let fig = compose_figure(&square(), &cfg, &LayoutCfg::default()).unwrap();
    assert!(fig.vertex_labels.is_empty());
    let alt = &fig.special_lines[0];
    assert_eq!(alt.line.kind, SpecialLineKind::Altitude);
    assert_eq!(alt.line.foot, Some(Coord::new(150.0, 200.0)));
    assert!(alt.foot_marker.is_some());
    assert_eq!(alt.color.as_deref(), Some("red"));

    let bad = serde_json::from_str::<FigureCfg>(r#"{"angles":[{"vertex":4}]}"#);
    assert!(bad.is_err());
}

#[test]
fn figure_json_uses_renderer_field_names() {
    let q = build_from_kind(QuadKind::Crossed);
    let fig = compose_figure(&q, &FigureCfg::default(), &LayoutCfg::default()).unwrap();
    let v = serde_json::to_value(&fig).unwrap();
    assert!(v["viewBox"]["minX"].is_number());
    assert_eq!(v["report"]["kind"], "crossed");
    assert_eq!(v["report"]["isSelfIntersecting"], true);
    assert_eq!(v["style"]["strokeDashArray"], "5,5");
    assert!(v["vertexLabels"].as_array().unwrap().len() == 4);
    assert!(v["specialLines"].as_array().unwrap().is_empty());
}

#[test]
fn canonical_figures_keep_labels_in_view() {
    let layout = LayoutCfg::default();
    for kind in QuadKind::ALL {
        let q = build_from_kind(kind);
        let cfg = FigureCfg {
            sides: SideId::ALL
                .into_iter()
                .map(|side| SideConfig {
                    side,
                    label: Some("x".into()),
                    ..SideConfig::default()
                })
                .collect(),
            angles: VertexId::ALL
                .into_iter()
                .map(|vertex| AngleConfig {
                    vertex,
                    show_degrees: true,
                    ..AngleConfig::default()
                })
                .collect(),
            ..FigureCfg::default()
        };
        let fig = compose_figure(&q, &cfg, &layout).unwrap();
        for p in fig.label_positions() {
            assert!(fig.view_box.contains(p), "{kind}: {p:?} outside");
        }
        for l in &fig.vertex_labels {
            assert!(!inside_fill(&q, l.position), "{kind}: {:?} label on the fill", l.vertex);
        }
        for s in &fig.sides {
            let p = s.label_position.unwrap();
            assert!(!inside_fill(&q, p), "{kind}: {:?} label on the fill", s.side);
        }
    }
}

/// Even-odd test against the outline.
fn inside_fill(q: &Quad, p: Coord) -> bool {
    let cs = q.coords();
    let mut inside = false;
    for i in 0..4 {
        let (a, b) = (cs[i], cs[(i + 1) % 4]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
    }
    inside
}

#[test]
fn notch_vertex_on_the_centroid_labels_into_the_notch() {
    let q = build_from_kind(QuadKind::Concave);
    let v2 = q.coord(VertexId::V2);
    assert!(distance(crate::quad::centroid(&q), v2) < 1e-9);
    let p = vertex_label_position(&q, VertexId::V2, 20.0);
    assert!((p.x - v2.x).abs() < 1e-9 && (p.y - v2.y - 20.0).abs() < 1e-9);
    assert!(!inside_fill(&q, p));
}

proptest! {
    #[test]
    fn view_box_keeps_padding_around_every_vertex(
        pts in proptest::array::uniform4((-500.0f64..500.0, -500.0f64..500.0)),
        padding in 0.0f64..100.0,
    ) {
        let q = Quad::from_coords(pts);
        let vb = calculate_view_box(&q, padding).unwrap();
        for c in q.coords() {
            prop_assert!(c.x - vb.min_x >= padding - 1e-9);
            prop_assert!(vb.max_x() - c.x >= padding - 1e-9);
            prop_assert!(c.y - vb.min_y >= padding - 1e-9);
            prop_assert!(vb.max_y() - c.y >= padding - 1e-9);
        }
    }

    #[test]
    fn default_labels_fit_default_view_box(
        pts in proptest::array::uniform4((-300.0f64..300.0, -300.0f64..300.0)),
    ) {
        let q = Quad::from_coords(pts);
        let layout = LayoutCfg::default();
        let vb = calculate_view_box(&q, layout.padding).unwrap();
        for v in VertexId::ALL {
            prop_assert!(vb.contains(vertex_label_position(&q, v, layout.vertex_label_distance)));
            if let Some(p) = angle_label_position(&q, v, layout.angle_label_distance) {
                prop_assert!(vb.contains(p));
            }
        }
        for s in SideId::ALL {
            if let Some(p) = side_label_position(&q, s, layout.side_label_distance) {
                prop_assert!(vb.contains(p));
            }
        }
    }

    #[test]
    fn minor_arc_never_exceeds_a_half_turn(
        pts in proptest::array::uniform4((-100.0f64..100.0, -100.0f64..100.0)),
        v in 0usize..4,
    ) {
        let q = Quad::from_coords(pts);
        let v = VertexId::new(v).unwrap();
        if let Some(arc) = describe_angle_arc(&q, v, 10.0) {
            prop_assert!(arc.sweep_deg <= 180.0 + 1e-9);
            prop_assert!(!arc.large_arc);
            prop_assert!((distance(arc.center, arc.start) - 10.0).abs() < 1e-9);
            prop_assert!((distance(arc.center, arc.end) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tick_count_matches_request(count in 0usize..6, side in 0usize..4) {
        let s = SideId::new(side).unwrap();
        let marks = describe_parallel_marks(&square(), s, count, 5.0, 10.0).unwrap();
        prop_assert_eq!(marks.ticks.len(), count);
        prop_assert_eq!(marks.side, s);
    }
}
