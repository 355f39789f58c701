//! # Draw Records
//!
//! The concrete, frame-ready primitives handed to the host's drawing
//! collaborator after `end_graph`. All coordinates are in screen space
//! (pixels), already transformed to the frame's anchor; the host only
//! needs to rasterize them.
//!
//! Text positions are the *center* of the text: the core cannot measure
//! fonts, so the host subtracts half its measured text size.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Label text with its screen-space center.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextDraw {
    pub position: Vec2,
    pub text: String,
}

/// Renderable geometry for one node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDrawData {
    /// Closed convex polygon approximating the node's ellipse.
    pub polygon: Vec<Vec2>,
    /// Centered label.
    pub label: TextDraw,
    /// Outline and text color.
    pub stroke: Vec4,
    /// Interior fill color.
    pub fill: Vec4,
}

/// Renderable geometry for one edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeDrawData {
    /// Curve-sampled polyline in draw order.
    pub polyline: Vec<Vec2>,
    /// Filled arrowhead triangle at the head end.
    pub arrow: [Vec2; 3],
    /// Centered label, when the edge has one.
    pub label: Option<TextDraw>,
    /// Stroke color for polyline, arrowhead and label.
    pub stroke: Vec4,
    /// One thin quadrilateral per polyline segment, used as the hover
    /// hit-region for this curved edge.
    pub hover_quads: Vec<[Vec2; 4]>,
}

impl EdgeDrawData {
    /// True when `point` lies inside any of the per-segment hover quads.
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.hover_quads
            .iter()
            .any(|quad| point_in_convex_quad(quad, point))
    }
}

/// Point-in-convex-quadrilateral test via edge cross products. The quad's
/// winding may be either direction; all four signs just have to agree.
pub fn point_in_convex_quad(quad: &[Vec2; 4], point: Vec2) -> bool {
    let mut positive = false;
    let mut negative = false;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b - a).perp_dot(point - a);
        if cross > 0.0 {
            positive = true;
        } else if cross < 0.0 {
            negative = true;
        }
    }
    !(positive && negative)
}

/// Everything the host needs to draw one graph this frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput<'a> {
    pub nodes: &'a [NodeDrawData],
    pub edges: &'a [EdgeDrawData],
    /// Screen-space size to reserve in the surrounding layout.
    pub reserved: Vec2,
}
