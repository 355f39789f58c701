//! # Session / Frame Driver
//!
//! Orchestrates one `begin_graph` / `add_node` / `add_edge` / `end_graph`
//! cycle. Registration accumulates three things side by side: the content
//! signature (the sole re-layout trigger), the engine-facing
//! [`GraphSpec`], and the edge-id side table the parser consults.
//!
//! The driver is an explicit session object with a runtime-checked
//! {Closed, Open} state machine: registration calls outside an open cycle
//! and nested opens are rejected with typed errors instead of silently
//! corrupting per-cycle state. At most one graph may be open at a time.

use std::collections::HashMap;
use std::fmt::Write;

use glam::{Vec2, Vec4};
use thiserror::Error;

use crate::cache::LayoutCache;
use crate::color;
use crate::config::CanvasConfig;
use crate::engine::{Algorithm, EdgeSpec, EngineError, GraphSpec, LayoutEngine, NodeSpec};
use crate::plain::{self, ParseError};
use crate::render::FrameOutput;

/// Misuse of the session API or a failure inside one cycle. Engine and
/// parse failures are fatal for the cycle that raised them; the other
/// variants indicate an integration bug.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("a graph is already open; every begin_graph needs a matching end_graph")]
    AlreadyOpen,
    #[error("no graph is open; call begin_graph first")]
    NotOpen,
    #[error("edge {edge:?} references node {node:?} which was not added this cycle")]
    UnknownNode { edge: String, node: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Per-cycle accumulation state; dropped wholesale when the cycle ends,
/// on every exit path.
struct OpenGraph {
    key: u64,
    algorithm: Algorithm,
    pixels_per_unit: f32,
    signature: String,
    spec: GraphSpec,
    edge_colors: HashMap<u32, Vec4>,
}

/// The main entry point: a graph canvas bound to one layout engine.
///
/// Holds the per-instance layout cache for the process lifetime. Intended
/// to be instantiated once and driven every frame from the thread that
/// owns the surrounding render loop.
pub struct GraphCanvas<E> {
    /// Geometry and styling knobs.
    pub config: CanvasConfig,
    /// The layout engine invoked on content changes.
    pub engine: E,
    cache: LayoutCache,
    open: Option<OpenGraph>,
}

impl<E: LayoutEngine> GraphCanvas<E> {
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, CanvasConfig::default())
    }

    pub fn with_config(engine: E, config: CanvasConfig) -> Self {
        Self {
            config,
            engine,
            cache: LayoutCache::default(),
            open: None,
        }
    }

    /// Opens a registration cycle for the graph instance identified by
    /// `id`. Rejected while another graph is open.
    pub fn begin_graph(
        &mut self,
        id: &str,
        algorithm: Algorithm,
        pixels_per_unit: f32,
    ) -> Result<(), CanvasError> {
        if self.open.is_some() {
            return Err(CanvasError::AlreadyOpen);
        }
        let mut signature = String::new();
        signature.push_str(algorithm.as_str());
        self.open = Some(OpenGraph {
            key: stable_key(id) as u64,
            algorithm,
            pixels_per_unit,
            signature,
            spec: GraphSpec::default(),
            edge_colors: HashMap::new(),
        });
        Ok(())
    }

    /// Adds a node with the configured default colors.
    pub fn add_node(&mut self, id: &str) -> Result<(), CanvasError> {
        let stroke = self.config.default_stroke;
        let fill = self.config.default_fill;
        self.add_node_with_colors(id, stroke, fill)
    }

    /// Adds a node with explicit stroke and fill colors.
    ///
    /// The display label is `id` truncated at the first `"##"`; the part
    /// after it only disambiguates identity.
    pub fn add_node_with_colors(
        &mut self,
        id: &str,
        stroke: Vec4,
        fill: Vec4,
    ) -> Result<(), CanvasError> {
        let open = self.open.as_mut().ok_or(CanvasError::NotOpen)?;
        let name = stable_key(id).to_string();
        let stroke_token = color::encode(color::pack(stroke));
        let fill_token = color::encode(color::pack(fill));
        let _ = write!(
            open.signature,
            "|n:{name},{stroke_token},{fill_token}"
        );
        open.spec.nodes.push(NodeSpec {
            name,
            label: display_label(id).to_string(),
            color: stroke_token.to_string(),
            fillcolor: fill_token.to_string(),
        });
        Ok(())
    }

    /// Adds an edge with the configured default stroke color.
    pub fn add_edge(&mut self, id: &str, tail_id: &str, head_id: &str) -> Result<(), CanvasError> {
        let stroke = self.config.default_stroke;
        self.add_edge_with_color(id, tail_id, head_id, stroke)
    }

    /// Adds an edge between two nodes already added this cycle.
    ///
    /// The engine does not round-trip custom edge identifiers, so the
    /// edge's numeric id is written into the engine's color slot and the
    /// real stroke color is parked in the side table for the parser.
    pub fn add_edge_with_color(
        &mut self,
        id: &str,
        tail_id: &str,
        head_id: &str,
        stroke: Vec4,
    ) -> Result<(), CanvasError> {
        let open = self.open.as_mut().ok_or(CanvasError::NotOpen)?;
        let tail = stable_key(tail_id).to_string();
        let head = stable_key(head_id).to_string();
        for (node_id, name) in [(tail_id, &tail), (head_id, &head)] {
            if !open.spec.has_node(name) {
                return Err(CanvasError::UnknownNode {
                    edge: id.to_string(),
                    node: node_id.to_string(),
                });
            }
        }

        let edge_key = stable_key(id);
        let stroke_token = color::encode(color::pack(stroke));
        let _ = write!(
            open.signature,
            "|e:{edge_key},{tail},{head},{stroke_token}"
        );
        open.edge_colors.insert(edge_key, stroke);
        open.spec.edges.push(EdgeSpec {
            tail,
            head,
            label: display_label(id).to_string(),
            color_slot: color::encode(edge_key).to_string(),
        });
        Ok(())
    }

    /// Closes the cycle: decides whether to re-layout (content signature
    /// changed) and whether to regenerate draw buffers (anchor or scale
    /// moved, or a re-layout just happened), then returns the buffers.
    ///
    /// `anchor` is the screen-space origin the graph is drawn at this
    /// frame.
    pub fn end_graph(&mut self, anchor: Vec2) -> Result<FrameOutput<'_>, CanvasError> {
        let open = self.open.take().ok_or(CanvasError::NotOpen)?;
        let entry = self.cache.entry(open.key, open.algorithm);

        if entry.needs_layout(&open.signature) {
            tracing::debug!(
                key = open.key,
                algorithm = open.algorithm.as_str(),
                "content changed, invoking layout engine"
            );
            let report = self.engine.layout(&open.spec, open.algorithm)?;
            let snapshot = plain::parse_report(&report, Some(&open.edge_colors))?;
            entry.store_layout(open.signature, snapshot);
        }

        if entry.needs_regenerate(anchor, open.pixels_per_unit) {
            entry.regenerate(anchor, open.pixels_per_unit, &self.config);
        }

        Ok(FrameOutput {
            nodes: &entry.nodes,
            edges: &entry.edges,
            reserved: entry.snapshot.size * open.pixels_per_unit,
        })
    }

    /// True while a cycle is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Discards every cached layout; the next cycle per instance will
    /// re-invoke the engine.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Stable 32-bit FNV-1a hash of a registration id. The engine sees this
/// (rendered in decimal) instead of the raw id so that ids stay opaque
/// and attribute-safe.
pub fn stable_key(id: &str) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in id.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}

/// The display portion of a registration id: everything before the first
/// `"##"`. Ids may carry a hidden suffix to stay unique while sharing a
/// visible label.
pub fn display_label(id: &str) -> &str {
    id.split("##").next().unwrap_or(id)
}
