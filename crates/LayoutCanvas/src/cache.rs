//! # Layout Cache
//!
//! One entry per graph instance key, holding the last content signature,
//! the last parsed snapshot and the draw buffers derived from it. Two
//! independent staleness axes decide the per-frame work:
//!
//! 1. **Content**: the signature accumulated this cycle differs from the
//!    stored one. Only then is the external layout engine invoked.
//! 2. **Anchor**: the screen anchor (or pixels-per-unit) moved. Only then
//!    are draw buffers regenerated from the snapshot.
//!
//! A fresh layout always forces buffer regeneration: new geometry never
//! reuses old buffers. Entries are created lazily and never evicted,
//! an accepted unbounded-growth tradeoff for long-lived UIs with a small,
//! stable set of graph instances.

use std::collections::HashMap;

use glam::Vec2;

use crate::config::CanvasConfig;
use crate::engine::Algorithm;
use crate::model::GraphSnapshot;
use crate::painter::Painter;
use crate::render::{EdgeDrawData, NodeDrawData};

/// Cached state for one graph instance.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Signature of the content the snapshot was laid out from. Empty
    /// until the first layout, and a real signature is never empty, so
    /// the first cycle always lays out.
    pub signature: String,
    pub snapshot: GraphSnapshot,
    pub algorithm: Algorithm,
    pub pixels_per_unit: f32,
    /// Anchor the draw buffers were generated at. NAN until the first
    /// generation so the first anchor check always trips.
    pub anchor: Vec2,
    pub nodes: Vec<NodeDrawData>,
    pub edges: Vec<EdgeDrawData>,
}

impl CacheEntry {
    fn new(algorithm: Algorithm) -> Self {
        Self {
            signature: String::new(),
            snapshot: GraphSnapshot::default(),
            algorithm,
            pixels_per_unit: 0.0,
            anchor: Vec2::NAN,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Content-staleness check (axis 1).
    pub fn needs_layout(&self, signature: &str) -> bool {
        self.signature != signature
    }

    /// Replaces the snapshot wholesale after a fresh layout.
    pub fn store_layout(&mut self, signature: String, snapshot: GraphSnapshot) {
        self.signature = signature;
        self.snapshot = snapshot;
        // Invalidate the derived buffers unconditionally.
        self.anchor = Vec2::NAN;
    }

    /// Anchor-staleness check (axis 2). `Vec2::NAN` never compares equal
    /// to anything, which is exactly the forced-regeneration behavior a
    /// fresh layout needs.
    pub fn needs_regenerate(&self, anchor: Vec2, ppu: f32) -> bool {
        self.anchor != anchor || self.pixels_per_unit != ppu
    }

    /// Rebuilds the draw buffers at a new anchor.
    pub fn regenerate(&mut self, anchor: Vec2, ppu: f32, config: &CanvasConfig) {
        let (nodes, edges) = Painter::build(&self.snapshot, anchor, ppu, config);
        self.nodes = nodes;
        self.edges = edges;
        self.anchor = anchor;
        self.pixels_per_unit = ppu;
        tracing::trace!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "regenerated draw buffers"
        );
    }
}

/// The per-instance cache map, keyed by the caller's hashed instance key.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<u64, CacheEntry>,
}

impl LayoutCache {
    /// Fetches the entry for an instance, creating it on first use.
    pub fn entry(&mut self, key: u64, algorithm: Algorithm) -> &mut CacheEntry {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(algorithm));
        entry.algorithm = algorithm;
        entry
    }

    /// Drops every cached layout and draw buffer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
