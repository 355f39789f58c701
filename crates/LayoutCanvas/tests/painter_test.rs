use glam::{Vec2, Vec4};
use layout_canvas::CanvasConfig;
use layout_canvas::model::{Edge, EdgeLabel, GraphSnapshot, Node};
use layout_canvas::painter::Painter;
use layout_canvas::render::point_in_convex_quad;

fn snapshot_with_node() -> GraphSnapshot {
    GraphSnapshot {
        nodes: vec![Node {
            name: "1".to_string(),
            label: "A".to_string(),
            position: Vec2::new(1.0, 1.0),
            size: Vec2::new(0.5, 0.3),
            stroke: Vec4::ONE,
            fill: Vec4::new(0.0, 0.0, 0.0, 0.7),
        }],
        edges: Vec::new(),
        size: Vec2::new(3.0, 2.0),
        scale: 1.0,
    }
}

fn snapshot_with_edge(points: Vec<Vec2>) -> GraphSnapshot {
    GraphSnapshot {
        nodes: Vec::new(),
        edges: vec![Edge {
            points,
            tail: "1".to_string(),
            head: "2".to_string(),
            label: Some(EdgeLabel {
                text: "e".to_string(),
                position: Vec2::new(1.0, 1.0),
            }),
            stroke: Vec4::ONE,
        }],
        size: Vec2::new(3.0, 2.0),
        scale: 1.0,
    }
}

#[test]
fn test_node_polygon_is_centered_with_flipped_y() {
    let anchor = Vec2::new(10.0, 20.0);
    let config = CanvasConfig::default();
    let (nodes, _) = Painter::build(&snapshot_with_node(), anchor, 100.0, &config);

    let node = &nodes[0];
    assert_eq!(node.polygon.len(), config.node_segments);

    // Layout y grows upward: screen y = anchor.y + (height - y) * ppu.
    let expected_center = Vec2::new(10.0 + 100.0, 20.0 + (2.0 - 1.0) * 100.0);
    assert_eq!(node.label.position, expected_center);

    // Every vertex sits on the ellipse around the center.
    for vertex in &node.polygon {
        let offset = *vertex - expected_center;
        assert!(offset.x.abs() <= 0.5 / 2.0 * 100.0 + 1e-3);
        assert!(offset.y.abs() <= 0.3 / 2.0 * 100.0 + 1e-3);
    }

    // First vertex is at angle zero: center + (rx, 0).
    assert!((node.polygon[0] - (expected_center + Vec2::new(25.0, 0.0))).length() < 1e-3);
}

#[test]
fn test_minimum_segment_counts_are_enforced() {
    let config = CanvasConfig {
        node_segments: 0,
        curve_samples: 0,
        ..CanvasConfig::default()
    };
    let snapshot = snapshot_with_edge(vec![Vec2::ZERO, Vec2::new(1.0, 1.0)]);
    let (_, edges) = Painter::build(&snapshot, Vec2::ZERO, 100.0, &config);
    assert_eq!(edges[0].polyline.len(), 2);

    let (nodes, _) = Painter::build(&snapshot_with_node(), Vec2::ZERO, 100.0, &config);
    assert_eq!(nodes[0].polygon.len(), 2);
}

#[test]
fn test_edge_polyline_spans_transformed_endpoints() {
    let anchor = Vec2::new(5.0, 5.0);
    let config = CanvasConfig::default();
    let snapshot = snapshot_with_edge(vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)]);
    let (_, edges) = Painter::build(&snapshot, anchor, 10.0, &config);

    let edge = &edges[0];
    assert_eq!(edge.polyline.len(), config.curve_samples);
    // t=0 maps the first control point, t=1 the last, both y-flipped.
    assert_eq!(edge.polyline[0], Vec2::new(5.0, 5.0 + 2.0 * 10.0));
    assert_eq!(edge.polyline[config.curve_samples - 1], Vec2::new(25.0, 5.0));
}

#[test]
fn test_arrowhead_sits_at_curve_end_against_tangent() {
    let config = CanvasConfig::default();
    let ppu = 100.0;
    // Horizontal edge pointing in +x.
    let snapshot = snapshot_with_edge(vec![Vec2::new(0.0, 1.0), Vec2::new(2.0, 1.0)]);
    let (_, edges) = Painter::build(&snapshot, Vec2::ZERO, ppu, &config);

    let edge = &edges[0];
    let tip = edge.arrow[2];
    assert_eq!(tip, *edge.polyline.last().unwrap());

    // The two base vertices are pulled back along -x and spread along y.
    let pullback = config.arrow_pullback * ppu;
    let spread = config.arrow_spread * ppu;
    for base in &edge.arrow[..2] {
        assert!((base.x - (tip.x - pullback)).abs() < 1e-3);
        assert!(((base.y - tip.y).abs() - spread).abs() < 1e-3);
    }
    assert!((edge.arrow[0].y - edge.arrow[1].y).abs() > spread);
}

#[test]
fn test_hover_quads_cover_the_polyline() {
    let config = CanvasConfig::default();
    let snapshot = snapshot_with_edge(vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)]);
    let (_, edges) = Painter::build(&snapshot, Vec2::ZERO, 100.0, &config);

    let edge = &edges[0];
    assert_eq!(edge.hover_quads.len(), edge.polyline.len() - 1);

    // A point slightly off the curve but within the lateral half-width
    // is hovered; one beyond it is not.
    let on_curve = (edge.polyline[3] + edge.polyline[4]) * 0.5;
    assert!(edge.hit_test(on_curve + Vec2::new(0.0, config.hover_half_width * 0.5)));
    assert!(!edge.hit_test(on_curve + Vec2::new(0.0, config.hover_half_width * 10.0)));
}

#[test]
fn test_point_in_convex_quad_windings() {
    let quad = [
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    assert!(point_in_convex_quad(&quad, Vec2::new(2.0, 1.0)));
    assert!(!point_in_convex_quad(&quad, Vec2::new(5.0, 1.0)));

    // Reversed winding behaves identically.
    let reversed = [quad[3], quad[2], quad[1], quad[0]];
    assert!(point_in_convex_quad(&reversed, Vec2::new(2.0, 1.0)));
    assert!(!point_in_convex_quad(&reversed, Vec2::new(-1.0, 1.0)));
}

#[test]
fn test_edge_label_is_transformed_like_nodes() {
    let config = CanvasConfig::default();
    let snapshot = snapshot_with_edge(vec![Vec2::ZERO, Vec2::new(2.0, 2.0)]);
    let (_, edges) = Painter::build(&snapshot, Vec2::new(1.0, 1.0), 10.0, &config);

    let label = edges[0].label.as_ref().unwrap();
    assert_eq!(label.text, "e");
    assert_eq!(label.position, Vec2::new(1.0 + 10.0, 1.0 + (2.0 - 1.0) * 10.0));
}
