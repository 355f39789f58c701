//! # Configuration
//!
//! Tunable constants for geometry derivation, plus the default colors
//! used by the short registration calls.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Geometry and styling knobs for the canvas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Vertices in each node's ellipse polygon (minimum 2). Default: 32.
    pub node_segments: usize,
    /// Uniform samples per edge curve (minimum 2). Default: 64.
    pub curve_samples: usize,
    /// Arrowhead pull-back along the tangent, in layout units
    /// (multiplied by pixels-per-unit). Default: 0.1.
    pub arrow_pullback: f32,
    /// Arrowhead lateral spread, in layout units. Default: 0.0437.
    pub arrow_spread: f32,
    /// Half-width of the per-segment hover quads, in pixels. Default: 4.0.
    pub hover_half_width: f32,
    /// Stroke color used by `add_node`/`add_edge` without explicit colors.
    pub default_stroke: Vec4,
    /// Fill color used by `add_node` without explicit colors.
    pub default_fill: Vec4,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_segments: 32,
            curve_samples: 64,
            arrow_pullback: 0.1,
            arrow_spread: 0.0437,
            hover_half_width: 4.0,
            default_stroke: Vec4::new(1.0, 1.0, 1.0, 1.0),
            default_fill: Vec4::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}
