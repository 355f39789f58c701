//! # Layout Result Model
//!
//! The structured graph reconstructed from one layout-engine run. A
//! [`GraphSnapshot`] is immutable once produced: re-layout replaces it
//! wholesale, never mutates it in place. Positions and sizes are in
//! layout-space units (Y grows upward); the painter applies the
//! screen-space transform.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A node placed by the layout engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Stable engine-facing name (the hashed registration id).
    pub name: String,
    /// Display text.
    pub label: String,
    /// Center position in layout units.
    pub position: Vec2,
    /// Width/height in layout units.
    pub size: Vec2,
    /// Outline and text color.
    pub stroke: Vec4,
    /// Interior fill color.
    pub fill: Vec4,
}

/// An optional label attached to an edge, with its layout-space anchor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub text: String,
    /// Center of the label in layout units.
    pub position: Vec2,
}

/// An edge spline placed by the layout engine.
///
/// `points` always holds at least one point; with more than one, the
/// points are the control polygon of a Bezier curve of that degree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    /// Bezier control points in layout units.
    pub points: Vec<Vec2>,
    /// Name of the tail (source) node.
    pub tail: String,
    /// Name of the head (target) node.
    pub head: String,
    /// Optional label text and placement.
    pub label: Option<EdgeLabel>,
    /// Stroke color, recovered through the edge-id side table.
    pub stroke: Vec4,
}

/// One layout-engine run's complete result.
///
/// Nodes and edges preserve report order (the engine's emission order,
/// which is not necessarily registration order).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Bounding box of the drawing in layout units.
    pub size: Vec2,
    /// Scale factor reported by the engine.
    pub scale: f32,
}
