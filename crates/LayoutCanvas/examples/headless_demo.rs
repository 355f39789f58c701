use std::fmt::Write;

use glam::{Vec2, Vec4};
use layout_canvas::engine::{Algorithm, EngineError, GraphSpec, LayoutEngine};
use layout_canvas::{GraphCanvas, GraphvizCli};

/// Fallback engine used when no Graphviz binary is on PATH: places nodes
/// on a line and connects them with straight four-point splines.
#[derive(Default)]
struct LineEngine;

impl LayoutEngine for LineEngine {
    fn layout(&mut self, spec: &GraphSpec, _algorithm: Algorithm) -> Result<Vec<u8>, EngineError> {
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
                spec.nodes.iter().position(|n| n.name == name).unwrap_or(0) as f32
            };
            let (x0, x3) = (x(&edge.tail), x(&edge.head));
            let _ = writeln!(
                out,
                "edge {} {} 4 {x0} 0.5 {} 0.5 {} 0.5 {x3} 0.5 solid {}",
                edge.tail,
                edge.head,
                x0 + (x3 - x0) / 3.0,
                x0 + (x3 - x0) * 2.0 / 3.0,
                edge.color_slot
            );
        }
        out.push_str("stop\n");
        Ok(out.into_bytes())
    }
}

fn run_frame<E: layout_canvas::LayoutEngine>(
    canvas: &mut GraphCanvas<E>,
    anchor: Vec2,
) -> Result<(usize, usize, Vec2), layout_canvas::CanvasError> {
    canvas.begin_graph("demo", Algorithm::Dot, 100.0)?;
    canvas.add_node("start")?;
    canvas.add_node_with_colors(
        "work",
        Vec4::new(1.0, 1.0, 0.0, 1.0),
        Vec4::new(0.2, 0.2, 0.0, 0.7),
    )?;
    canvas.add_node("done")?;
    canvas.add_edge("begin##1", "start", "work")?;
    canvas.add_edge("finish##2", "work", "done")?;
    let frame = canvas.end_graph(anchor)?;
    Ok((frame.nodes.len(), frame.edges.len(), frame.reserved))
}

fn main() {
    println!("=== LayoutCanvas Headless Demo ===");

    // Prefer the real Graphviz CLI; fall back to the built-in line layout
    // when it is not installed.
    let mut canvas = GraphCanvas::new(GraphvizCli::default());
    let use_graphviz = run_frame(&mut canvas, Vec2::ZERO).is_ok();
    if use_graphviz {
        println!("Using Graphviz `dot` from PATH.");
    } else {
        println!("Graphviz not available, using the scripted line engine.");
    }

    if use_graphviz {
        drive(&mut canvas);
    } else {
        let mut canvas = GraphCanvas::new(LineEngine);
        drive(&mut canvas);
    }

    println!("\nDemo complete.");
}

fn drive<E: layout_canvas::LayoutEngine>(canvas: &mut GraphCanvas<E>) {
    // Frame 1: first cycle lays out and builds buffers.
    // Frame 2: identical content and anchor, everything served from cache.
    // Frame 3: the anchor moves (window scrolled), only buffers rebuild.
    let anchors = [Vec2::ZERO, Vec2::ZERO, Vec2::new(40.0, 12.0)];
    for (frame, anchor) in anchors.into_iter().enumerate() {
        println!("\n--- Frame {frame} (anchor {anchor}) ---");
        match run_frame(canvas, anchor) {
            Ok((nodes, edges, reserved)) => {
                println!("  {nodes} node buffers, {edges} edge buffers");
                println!("  reserving {}x{} px", reserved.x, reserved.y);
            }
            Err(err) => {
                eprintln!("  cycle failed: {err}");
                return;
            }
        }
    }
}
