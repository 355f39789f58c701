//! # Draw-Buffer Generation
//!
//! Converts a cached [`GraphSnapshot`] plus a screen anchor and a
//! pixels-per-unit scale into concrete renderable primitives: node
//! outline polygons, curve-sampled edge polylines, arrowheads, label
//! placements and per-segment hover quads.
//!
//! Layout space has Y growing upward while screen space grows downward,
//! so every point goes through the same flip-and-translate transform:
//! `screen = anchor + (x, graph_height - y) * ppu`.

use glam::Vec2;

use crate::config::CanvasConfig;
use crate::curve;
use crate::model::{Edge, GraphSnapshot, Node};
use crate::render::{EdgeDrawData, NodeDrawData, TextDraw};

/// Generates draw buffers from an abstract graph snapshot.
pub struct Painter;

impl Painter {
    /// Regenerates all node and edge buffers for one anchor position.
    pub fn build(
        snapshot: &GraphSnapshot,
        anchor: Vec2,
        ppu: f32,
        config: &CanvasConfig,
    ) -> (Vec<NodeDrawData>, Vec<EdgeDrawData>) {
        let transform = ScreenTransform {
            anchor,
            graph_height: snapshot.size.y,
            ppu,
        };
        let nodes = snapshot
            .nodes
            .iter()
            .map(|node| Self::build_node(node, &transform, config))
            .collect();
        let edges = snapshot
            .edges
            .iter()
            .map(|edge| Self::build_edge(edge, &transform, config))
            .collect();
        (nodes, edges)
    }

    fn build_node(
        node: &Node,
        transform: &ScreenTransform,
        config: &CanvasConfig,
    ) -> NodeDrawData {
        let segments = config.node_segments.max(2);
        let center = transform.apply(node.position);
        let radius = node.size * 0.5 * transform.ppu;

        let mut polygon = Vec::with_capacity(segments);
        for i in 0..segments {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            polygon.push(center + Vec2::new(angle.cos() * radius.x, angle.sin() * radius.y));
        }

        NodeDrawData {
            polygon,
            label: TextDraw {
                position: center,
                text: node.label.clone(),
            },
            stroke: node.stroke,
            fill: node.fill,
        }
    }

    fn build_edge(
        edge: &Edge,
        transform: &ScreenTransform,
        config: &CanvasConfig,
    ) -> EdgeDrawData {
        let samples = config.curve_samples.max(2);
        let mut polyline = Vec::with_capacity(samples);
        for i in 0..samples {
            let t = i as f32 / (samples - 1) as f32;
            polyline.push(transform.apply(curve::bezier_point(&edge.points, t)));
        }

        let arrow = Self::arrowhead(&polyline, transform.ppu, config);
        let hover_quads = Self::hover_quads(&polyline, config.hover_half_width);

        EdgeDrawData {
            polyline,
            arrow,
            label: edge.label.as_ref().map(|label| TextDraw {
                position: transform.apply(label.position),
                text: label.text.clone(),
            }),
            stroke: edge.stroke,
            hover_quads,
        }
    }

    /// Filled triangle anchored at the final sample, oriented along the
    /// normalized tangent of the last segment.
    fn arrowhead(polyline: &[Vec2], ppu: f32, config: &CanvasConfig) -> [Vec2; 3] {
        let tip = polyline[polyline.len() - 1];
        let prev = polyline[polyline.len() - 2];
        let dir = (tip - prev).normalize_or_zero();
        // Degenerate final segment: keep the arrowhead but pick an
        // arbitrary stable direction.
        let dir = if dir == Vec2::ZERO { Vec2::X } else { dir };
        let perp = dir.perp();
        let back = tip - dir * (config.arrow_pullback * ppu);
        let spread = perp * (config.arrow_spread * ppu);
        [back + spread, back - spread, tip]
    }

    /// One thin quadrilateral per polyline segment, extruded
    /// perpendicular to the segment direction. These are what give a
    /// curved edge a usable hover region under rectangle-based
    /// hit-testing hosts.
    fn hover_quads(polyline: &[Vec2], half_width: f32) -> Vec<[Vec2; 4]> {
        let mut quads = Vec::with_capacity(polyline.len().saturating_sub(1));
        for pair in polyline.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let offset = (b - a).normalize_or_zero().perp() * half_width;
            if offset == Vec2::ZERO {
                continue;
            }
            quads.push([a + offset, b + offset, b - offset, a - offset]);
        }
        quads
    }
}

/// The layout-space to screen-space transform for one frame.
struct ScreenTransform {
    anchor: Vec2,
    graph_height: f32,
    ppu: f32,
}

impl ScreenTransform {
    fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.anchor.x + point.x * self.ppu,
            self.anchor.y + (self.graph_height - point.y) * self.ppu,
        )
    }
}
