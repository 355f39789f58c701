use std::fmt::Write;

use glam::{Vec2, Vec4};
use layout_canvas::engine::{Algorithm, EngineError, GraphSpec, LayoutEngine};
use layout_canvas::{CanvasError, GraphCanvas};

/// Test engine: lays nodes out on a horizontal line and counts how often
/// it is invoked, so tests can assert exactly when re-layout happens.
#[derive(Default)]
struct ScriptedEngine {
    calls: usize,
}

impl LayoutEngine for ScriptedEngine {
    fn layout(&mut self, spec: &GraphSpec, _algorithm: Algorithm) -> Result<Vec<u8>, EngineError> {
        self.calls += 1;
        let mut out = format!("graph 1.0 {} 1.0\n", spec.nodes.len().max(1));
        for (i, node) in spec.nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "node {} {} 0.5 0.75 0.5 \"{}\" solid ellipse {} {}",
                node.name, i, node.label, node.color, node.fillcolor
            );
        }
        for edge in &spec.edges {
            let x = |name: &str| {
                spec.nodes
                    .iter()
                    .position(|n| n.name == name)
                    .expect("edge references a registered node") as f32
            };
            let (x0, x3) = (x(&edge.tail), x(&edge.head));
            let (x1, x2) = (x0 + (x3 - x0) / 3.0, x0 + (x3 - x0) * 2.0 / 3.0);
            let _ = write!(
                out,
                "edge {} {} 4 {x0} 0.5 {x1} 0.5 {x2} 0.5 {x3} 0.5 ",
                edge.tail, edge.head
            );
            if edge.label.is_empty() {
                let _ = writeln!(out, "solid {}", edge.color_slot);
            } else {
                let mid = (x0 + x3) * 0.5;
                let _ = writeln!(
                    out,
                    "\"{}\" {mid} 0.6 solid {}",
                    edge.label, edge.color_slot
                );
            }
        }
        out.push_str("stop\n");
        Ok(out.into_bytes())
    }
}

fn run_cycle(
    canvas: &mut GraphCanvas<ScriptedEngine>,
    fill_b: Vec4,
    anchor: Vec2,
    ppu: f32,
) -> usize {
    canvas.begin_graph("matrix", Algorithm::Dot, ppu).unwrap();
    canvas
        .add_node_with_colors("A", Vec4::ONE, Vec4::ZERO)
        .unwrap();
    canvas.add_node_with_colors("B", Vec4::ONE, fill_b).unwrap();
    canvas.add_edge("##a-to-b", "A", "B").unwrap();
    let frame = canvas.end_graph(anchor).unwrap();
    frame.nodes[0].polygon.len()
}

#[test]
fn test_layout_and_regen_staleness_matrix() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    let anchor = Vec2::new(10.0, 10.0);

    // First cycle always lays out and generates buffers.
    let segments = run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    assert_eq!(canvas.engine.calls, 1);
    assert_eq!(segments, canvas.config.node_segments);

    // Same content, same anchor: no layout, no regeneration. The config
    // change is the probe: untouched buffers keep the old vertex count.
    canvas.config.node_segments = 8;
    let segments = run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    assert_eq!(canvas.engine.calls, 1);
    assert_eq!(segments, 32);

    // Same content, moved anchor: no layout, one regeneration.
    let segments = run_cycle(&mut canvas, Vec4::ZERO, Vec2::new(50.0, 10.0), 100.0);
    assert_eq!(canvas.engine.calls, 1);
    assert_eq!(segments, 8);

    // Changed content (one fill color), same anchor: one layout, and the
    // fresh geometry forces a regeneration too.
    canvas.config.node_segments = 6;
    let segments = run_cycle(&mut canvas, Vec4::ONE, Vec2::new(50.0, 10.0), 100.0);
    assert_eq!(canvas.engine.calls, 2);
    assert_eq!(segments, 6);
}

#[test]
fn test_scale_change_regenerates_buffers() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    let anchor = Vec2::ZERO;

    run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    canvas.config.node_segments = 12;

    // Same content and anchor but a new pixels-per-unit: buffers must be
    // rebuilt without invoking the engine.
    let segments = run_cycle(&mut canvas, Vec4::ZERO, anchor, 50.0);
    assert_eq!(canvas.engine.calls, 1);
    assert_eq!(segments, 12);
}

#[test]
fn test_signature_idempotence() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    let anchor = Vec2::ZERO;

    // Re-registering the identical content in the identical order must
    // reproduce the identical signature: one layout across three cycles.
    run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    run_cycle(&mut canvas, Vec4::ZERO, anchor, 100.0);
    assert_eq!(canvas.engine.calls, 1);
}

#[test]
fn test_algorithm_change_triggers_layout() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());

    canvas.begin_graph("g", Algorithm::Dot, 100.0).unwrap();
    canvas.add_node("A").unwrap();
    canvas.end_graph(Vec2::ZERO).unwrap();
    assert_eq!(canvas.engine.calls, 1);

    canvas.begin_graph("g", Algorithm::Neato, 100.0).unwrap();
    canvas.add_node("A").unwrap();
    canvas.end_graph(Vec2::ZERO).unwrap();
    assert_eq!(canvas.engine.calls, 2);
}

#[test]
fn test_independent_instances_have_independent_caches() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    for key in ["left", "right", "left", "right"] {
        canvas.begin_graph(key, Algorithm::Dot, 100.0).unwrap();
        canvas.add_node("A").unwrap();
        canvas.end_graph(Vec2::ZERO).unwrap();
    }
    // Two instances, each laid out exactly once.
    assert_eq!(canvas.engine.calls, 2);
}

#[test]
fn test_session_state_machine_rejections() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());

    assert!(matches!(
        canvas.add_node("A"),
        Err(CanvasError::NotOpen)
    ));
    assert!(matches!(
        canvas.end_graph(Vec2::ZERO),
        Err(CanvasError::NotOpen)
    ));

    canvas.begin_graph("g", Algorithm::Dot, 100.0).unwrap();
    assert!(matches!(
        canvas.begin_graph("other", Algorithm::Dot, 100.0),
        Err(CanvasError::AlreadyOpen)
    ));

    // The original open survives the rejected nested one.
    canvas.add_node("A").unwrap();
    canvas.end_graph(Vec2::ZERO).unwrap();
    assert!(!canvas.is_open());
}

#[test]
fn test_edge_requires_registered_nodes() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    canvas.begin_graph("g", Algorithm::Dot, 100.0).unwrap();
    canvas.add_node("A").unwrap();

    let err = canvas.add_edge("a->ghost", "A", "ghost").unwrap_err();
    assert!(matches!(
        err,
        CanvasError::UnknownNode { node, .. } if node == "ghost"
    ));
}

#[test]
fn test_edge_hover_hit_regions() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    canvas.begin_graph("hover", Algorithm::Dot, 100.0).unwrap();
    canvas.add_node("A").unwrap();
    canvas.add_node("B").unwrap();
    canvas.add_edge("##e", "A", "B").unwrap();
    let frame = canvas.end_graph(Vec2::ZERO).unwrap();

    let edge = &frame.edges[0];
    let mid = edge.polyline[edge.polyline.len() / 2];
    assert!(edge.hit_test(mid), "point on the curve must report hovered");
    assert!(
        !edge.hit_test(mid + Vec2::new(0.0, 300.0)),
        "point far from every quad must not report hovered"
    );
}

#[test]
fn test_reserved_space_scales_with_ppu() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    canvas.begin_graph("g", Algorithm::Dot, 80.0).unwrap();
    canvas.add_node("A").unwrap();
    canvas.add_node("B").unwrap();
    let frame = canvas.end_graph(Vec2::ZERO).unwrap();

    // The scripted engine reports a 2x1 layout box for two nodes.
    assert_eq!(frame.reserved, Vec2::new(160.0, 80.0));
}

#[test]
fn test_clear_cache_forces_relayout() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    run_cycle(&mut canvas, Vec4::ZERO, Vec2::ZERO, 100.0);
    run_cycle(&mut canvas, Vec4::ZERO, Vec2::ZERO, 100.0);
    assert_eq!(canvas.engine.calls, 1);

    canvas.clear_cache();
    run_cycle(&mut canvas, Vec4::ZERO, Vec2::ZERO, 100.0);
    assert_eq!(canvas.engine.calls, 2);
}

#[test]
fn test_edge_label_round_trips_through_report() {
    let mut canvas = GraphCanvas::new(ScriptedEngine::default());
    canvas.begin_graph("g", Algorithm::Dot, 100.0).unwrap();
    canvas.add_node("A").unwrap();
    canvas.add_node("B").unwrap();
    // Visible label "take me", hidden suffix for identity.
    canvas.add_edge("take me##1", "A", "B").unwrap();
    let frame = canvas.end_graph(Vec2::ZERO).unwrap();

    let label = frame.edges[0].label.as_ref().expect("labeled edge");
    assert_eq!(label.text, "take me");
}
