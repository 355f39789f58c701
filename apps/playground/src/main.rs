use glam::{Vec2, Vec4};
use layout_canvas::{Algorithm, CanvasError, FrameOutput, GraphCanvas, GraphvizCli};
use macroquad::prelude as mq;

/// Demo content: the small LR-automaton graph, registered every frame.
/// Only signature changes reach the layout engine.
fn register_automaton(
    canvas: &mut GraphCanvas<GraphvizCli>,
    algorithm: Algorithm,
    ppu: f32,
) -> Result<(), CanvasError> {
    canvas.begin_graph("playground", algorithm, ppu)?;
    for state in ["LR_0", "LR_1", "LR_2", "LR_3", "LR_4", "LR_5"] {
        canvas.add_node(state)?;
    }
    canvas.add_node_with_colors(
        "LR_accept",
        Vec4::new(0.3, 1.0, 0.3, 1.0),
        Vec4::new(0.0, 0.3, 0.0, 0.7),
    )?;
    canvas.add_edge("S(B)##0", "LR_0", "LR_2")?;
    canvas.add_edge("S(S)##1", "LR_0", "LR_1")?;
    canvas.add_edge("S($end)##2", "LR_1", "LR_3")?;
    canvas.add_edge("S(b)##3", "LR_2", "LR_5")?;
    canvas.add_edge("S(a)##4", "LR_2", "LR_4")?;
    canvas.add_edge("S(a)##5", "LR_4", "LR_4")?;
    canvas.add_edge("S(b)##6", "LR_4", "LR_5")?;
    canvas.add_edge("accept##7", "LR_5", "LR_accept")?;
    Ok(())
}

fn to_mq_color(color: Vec4) -> mq::Color {
    mq::Color::new(color.x, color.y, color.z, color.w)
}

fn draw_frame(frame: &FrameOutput<'_>, mouse: Vec2) {
    for edge in frame.edges {
        let hovered = edge.hit_test(mouse);
        let thickness = if hovered { 3.0 } else { 1.0 };
        let color = to_mq_color(edge.stroke);

        for pair in edge.polyline.windows(2) {
            mq::draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, thickness, color);
        }
        mq::draw_triangle(
            mq::Vec2::new(edge.arrow[0].x, edge.arrow[0].y),
            mq::Vec2::new(edge.arrow[1].x, edge.arrow[1].y),
            mq::Vec2::new(edge.arrow[2].x, edge.arrow[2].y),
            color,
        );
        if let Some(label) = &edge.label {
            draw_centered_text(&label.text, label.position, color);
        }
    }

    for node in frame.nodes {
        let fill = to_mq_color(node.fill);
        let stroke = to_mq_color(node.stroke);

        // Triangle fan for the convex fill, then the outline on top.
        let first = node.polygon[0];
        for pair in node.polygon[1..].windows(2) {
            mq::draw_triangle(
                mq::Vec2::new(first.x, first.y),
                mq::Vec2::new(pair[0].x, pair[0].y),
                mq::Vec2::new(pair[1].x, pair[1].y),
                fill,
            );
        }
        let count = node.polygon.len();
        for i in 0..count {
            let a = node.polygon[i];
            let b = node.polygon[(i + 1) % count];
            mq::draw_line(a.x, a.y, b.x, b.y, 1.0, stroke);
        }
        draw_centered_text(&node.label.text, node.label.position, stroke);
    }
}

fn draw_centered_text(text: &str, center: Vec2, color: mq::Color) {
    let font_size = 16.0;
    let dims = mq::measure_text(text, None, font_size as u16, 1.0);
    mq::draw_text(
        text,
        center.x - dims.width / 2.0,
        center.y + dims.height / 2.0 - dims.offset_y / 2.0 + font_size / 2.0,
        font_size,
        color,
    );
}

#[macroquad::main("LayoutCanvas Playground")]
async fn main() {
    let mut canvas = GraphCanvas::new(GraphvizCli::default());
    let mut algorithm = Algorithm::Dot;
    let mut ppu = 100.0f32;
    let mut anchor = Vec2::new(60.0, 80.0);
    let mut drag_origin: Option<(Vec2, Vec2)> = None;
    let mut last_error: Option<String> = None;

    loop {
        mq::clear_background(mq::Color::new(0.1, 0.1, 0.1, 1.0));

        // Keys 1-7 pick the layout algorithm, up/down tune the scale.
        for (i, algo) in Algorithm::ALL.into_iter().enumerate() {
            let key = [
                mq::KeyCode::Key1,
                mq::KeyCode::Key2,
                mq::KeyCode::Key3,
                mq::KeyCode::Key4,
                mq::KeyCode::Key5,
                mq::KeyCode::Key6,
                mq::KeyCode::Key7,
            ][i];
            if mq::is_key_pressed(key) {
                algorithm = algo;
            }
        }
        if mq::is_key_down(mq::KeyCode::Up) {
            ppu = (ppu + 60.0 * mq::get_frame_time()).min(200.0);
        }
        if mq::is_key_down(mq::KeyCode::Down) {
            ppu = (ppu - 60.0 * mq::get_frame_time()).max(30.0);
        }

        // Dragging moves the anchor; the cache regenerates buffers but
        // never re-invokes the engine for that.
        let (mx, my) = mq::mouse_position();
        let mouse = Vec2::new(mx, my);
        if mq::is_mouse_button_down(mq::MouseButton::Left) {
            let (mouse_start, anchor_start) = *drag_origin.get_or_insert((mouse, anchor));
            anchor = anchor_start + (mouse - mouse_start);
        } else {
            drag_origin = None;
        }

        match register_automaton(&mut canvas, algorithm, ppu) {
            Ok(()) => match canvas.end_graph(anchor) {
                Ok(frame) => {
                    last_error = None;
                    draw_frame(&frame, mouse);
                }
                Err(err) => last_error = Some(err.to_string()),
            },
            Err(err) => last_error = Some(err.to_string()),
        }

        let status = format!(
            "layout: {}  (keys 1-7)   scale: {ppu:.0} px/unit (up/down)   drag to move",
            algorithm.as_str()
        );
        mq::draw_text(&status, 10.0, 20.0, 16.0, mq::WHITE);
        if let Some(err) = &last_error {
            mq::draw_text(err, 10.0, 40.0, 16.0, mq::RED);
        }

        mq::next_frame().await
    }
}
