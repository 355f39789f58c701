//! # LayoutCanvas
//!
//! `layout_canvas` is a headless library for rendering directed graphs
//! inside immediate-mode GUIs. An external layout engine (Graphviz)
//! computes node positions and edge splines once; this crate caches that
//! result across frames and derives frame-ready geometry (polygons,
//! curve samples, arrowheads, hover hit-regions) from it, re-invoking
//! the engine only when the graph's logical content actually changed.
//!
//! ## Core Architecture
//! - **Session (`src/session.rs`)**: the begin/add/end frame driver and
//!   content-signature accumulation.
//! - **Cache (`src/cache.rs`)**: per-instance layout results with two
//!   independent staleness axes (content vs. anchor).
//! - **Engine (`src/engine.rs`)**: the opaque layout boundary and the
//!   Graphviz CLI implementation.
//! - **Painter (`src/painter.rs`)**: turns cached snapshots into the
//!   screen-space draw records in `src/render.rs`.

pub mod cache;
pub mod color;
pub mod config;
pub mod curve;
pub mod engine;
pub mod model;
pub mod painter;
pub mod plain;
pub mod render;
pub mod session;

// Re-exports for convenience
pub use config::CanvasConfig;
pub use engine::{Algorithm, EngineError, GraphSpec, GraphvizCli, LayoutEngine};
pub use model::GraphSnapshot;
pub use plain::ParseError;
pub use render::{EdgeDrawData, FrameOutput, NodeDrawData};
pub use session::{CanvasError, GraphCanvas};
