//! # Layout Engine Boundary
//!
//! Everything that talks to the external graph-layout engine lives here:
//! the [`Algorithm`] selection, the [`GraphSpec`] accumulated during a
//! begin/end cycle, and the [`LayoutEngine`] trait the session drives.
//!
//! The engine is an opaque collaborator: it receives a graph description
//! and an algorithm name, and returns a "plain"-format text report (see
//! [`crate::plain`]). [`GraphvizCli`] is the production implementation,
//! shelling out to the Graphviz `dot` binary; tests substitute scripted
//! engines.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of layout algorithms understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Circo,
    Dot,
    Fdp,
    Neato,
    Osage,
    Sfdp,
    Twopi,
}

impl Algorithm {
    /// Every algorithm, in a stable order (useful for UI pickers).
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Circo,
        Algorithm::Dot,
        Algorithm::Fdp,
        Algorithm::Neato,
        Algorithm::Osage,
        Algorithm::Sfdp,
        Algorithm::Twopi,
    ];

    /// The engine-facing name.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Circo => "circo",
            Algorithm::Dot => "dot",
            Algorithm::Fdp => "fdp",
            Algorithm::Neato => "neato",
            Algorithm::Osage => "osage",
            Algorithm::Sfdp => "sfdp",
            Algorithm::Twopi => "twopi",
        }
    }
}

/// A node registered into the current cycle's layout input.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    /// Stable engine-facing name (hashed registration id).
    pub name: String,
    /// Display label attribute.
    pub label: String,
    /// Stroke color token.
    pub color: String,
    /// Fill color token.
    pub fillcolor: String,
}

/// An edge registered into the current cycle's layout input.
///
/// The color slot does not necessarily carry a color: the engine does not
/// round-trip caller-supplied identifiers for edges, so the session
/// smuggles the edge's numeric id through it as a `#hex` token and keeps
/// the real color in a side table.
#[derive(Clone, Debug)]
pub struct EdgeSpec {
    pub tail: String,
    pub head: String,
    /// Display label attribute.
    pub label: String,
    /// Token written to the engine's color attribute.
    pub color_slot: String,
}

/// The layout input accumulated between `begin_graph` and `end_graph`.
#[derive(Clone, Debug, Default)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl GraphSpec {
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    /// Renders the graph description as DOT source for engines that consume it.
    ///
    /// Edges default to `dir=none`: arrowheads are drawn by the painter,
    /// so the engine must not reserve room for its own.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph g {\n    edge [dir=\"none\"];\n");
        for node in &self.nodes {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\", color=\"{}\", fillcolor=\"{}\"];\n",
                escape(&node.name),
                escape(&node.label),
                node.color,
                node.fillcolor,
            ));
        }
        for edge in &self.edges {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [label=\"{}\", color=\"{}\"];\n",
                escape(&edge.tail),
                escape(&edge.head),
                escape(&edge.label),
                edge.color_slot,
            ));
        }
        out.push_str("}\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Failures from the external layout engine. Layout is synchronous and
/// assumed inexpensive, so any failure is structural and fatal for the
/// cycle that triggered it; no stale geometry is substituted.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to run layout engine: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// The opaque layout contract: graph description in, plain report out.
pub trait LayoutEngine {
    fn layout(&mut self, spec: &GraphSpec, algorithm: Algorithm) -> Result<Vec<u8>, EngineError>;
}

/// Production engine: the Graphviz `dot` binary invoked with
/// `-K<algorithm> -Tplain`, DOT source on stdin, report on stdout.
#[derive(Clone, Debug)]
pub struct GraphvizCli {
    /// Binary to invoke; defaults to `dot` on `PATH`.
    pub binary: String,
}

impl Default for GraphvizCli {
    fn default() -> Self {
        Self {
            binary: "dot".to_string(),
        }
    }
}

impl LayoutEngine for GraphvizCli {
    fn layout(&mut self, spec: &GraphSpec, algorithm: Algorithm) -> Result<Vec<u8>, EngineError> {
        let dot = spec.to_dot();
        tracing::debug!(
            algorithm = algorithm.as_str(),
            nodes = spec.nodes.len(),
            edges = spec.edges.len(),
            "invoking layout engine"
        );

        let mut child = Command::new(&self.binary)
            .arg(format!("-K{}", algorithm.as_str()))
            .arg("-Tplain")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is piped above, so take() cannot miss.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}
