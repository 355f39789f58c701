//! # Plain-Report Parser
//!
//! Consumes the layout engine's line-oriented "plain" text report and
//! reconstructs a [`GraphSnapshot`]. The format is a closed, versionless
//! contract with the engine:
//!
//! ```text
//! graph scale width height
//! node name x y width height label style shape color fillcolor
//! edge tail head n x1 y1 .. xn yn [label lx ly] style color
//! stop
//! ```
//!
//! Tokens are whitespace-separated, except quoted tokens which are read
//! verbatim to the closing quote (labels may contain spaces). Any other
//! leading token is a protocol violation and fails parsing outright.
//!
//! When an edge-id side table is supplied, the edge color slot is decoded
//! as a smuggled id instead of a color and the true stroke color is looked
//! up in the table; a missing entry means the edge was never registered in
//! the cycle that produced the report, which is an integration bug.

use std::collections::HashMap;

use glam::{Vec2, Vec4};
use thiserror::Error;

use crate::color;
use crate::model::{Edge, EdgeLabel, GraphSnapshot, Node};

/// Failures while reading a layout report. All of these indicate a broken
/// engine contract or a registration bug, not a recoverable condition.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("report is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("unexpected record {0:?} in layout report")]
    UnknownRecord(String),
    #[error("report line ended while expecting {0}")]
    MissingToken(&'static str),
    #[error("malformed number {0:?} in layout report")]
    BadNumber(String),
    #[error("malformed color token {0:?} in layout report")]
    BadColor(String),
    #[error("edge color slot carries id {0:#x} with no registered color")]
    UnknownEdgeId(u32),
}

/// Whitespace tokenizer over one report line with quoted-string support.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start_matches(' ');
        if self.rest.is_empty() {
            return None;
        }
        if let Some(quoted) = self.rest.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            let token = &quoted[..end];
            self.rest = quoted.get(end + 1..).unwrap_or("");
            return Some(token);
        }
        let end = self.rest.find(' ').unwrap_or(self.rest.len());
        let token = &self.rest[..end];
        self.rest = &self.rest[end..];
        Some(token)
    }

    fn expect(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.next().ok_or(ParseError::MissingToken(what))
    }

    fn number(&mut self, what: &'static str) -> Result<f32, ParseError> {
        let token = self.expect(what)?;
        token
            .parse::<f32>()
            .map_err(|_| ParseError::BadNumber(token.to_string()))
    }
}

fn decode_color(token: &str) -> Result<Vec4, ParseError> {
    color::decode(token)
        .map(color::unpack)
        .ok_or_else(|| ParseError::BadColor(token.to_string()))
}

/// Parses a full plain report into a snapshot.
///
/// `edge_colors` activates edge-id recovery: the edge color slot is read
/// as a smuggled id and resolved through the table. Pass `None` to decode
/// the slot directly as a color token.
pub fn parse_report(
    data: &[u8],
    edge_colors: Option<&HashMap<u32, Vec4>>,
) -> Result<GraphSnapshot, ParseError> {
    let text = std::str::from_utf8(data)?;
    let mut graph = GraphSnapshot::default();

    for line in text.lines() {
        let mut tokens = Tokens::new(line);
        let Some(record) = tokens.next() else {
            continue;
        };
        match record {
            "graph" => {
                graph.scale = tokens.number("graph scale")?;
                graph.size.x = tokens.number("graph width")?;
                graph.size.y = tokens.number("graph height")?;
            }
            "node" => graph.nodes.push(parse_node(&mut tokens)?),
            "edge" => graph.edges.push(parse_edge(&mut tokens, edge_colors)?),
            "stop" => return Ok(graph),
            other => return Err(ParseError::UnknownRecord(other.to_string())),
        }
    }
    Ok(graph)
}

fn parse_node(tokens: &mut Tokens<'_>) -> Result<Node, ParseError> {
    let name = tokens.expect("node name")?.to_string();
    let position = Vec2::new(tokens.number("node x")?, tokens.number("node y")?);
    let size = Vec2::new(tokens.number("node width")?, tokens.number("node height")?);
    let label = tokens.expect("node label")?.to_string();
    tokens.expect("node style")?;
    tokens.expect("node shape")?;
    let stroke = decode_color(tokens.expect("node color")?)?;
    let fill = decode_color(tokens.expect("node fillcolor")?)?;
    Ok(Node {
        name,
        label,
        position,
        size,
        stroke,
        fill,
    })
}

fn parse_edge(
    tokens: &mut Tokens<'_>,
    edge_colors: Option<&HashMap<u32, Vec4>>,
) -> Result<Edge, ParseError> {
    let tail = tokens.expect("edge tail")?.to_string();
    let head = tokens.expect("edge head")?.to_string();
    let count = tokens.number("edge point count")? as usize;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Vec2::new(
            tokens.number("edge point x")?,
            tokens.number("edge point y")?,
        ));
    }

    // The trailing tokens take one of two shapes:
    //   label lx ly style color      (labeled edge)
    //   style color                  (unlabeled edge)
    // A present third trailing token is the discriminator, exactly as the
    // engine's grammar dictates.
    let s1 = tokens.next();
    let s2 = tokens.next();
    let s3 = tokens.next();
    let _style = tokens.next();
    let s5 = tokens.next();

    let (label, color_slot) = if s3.is_some() {
        let text = s1.ok_or(ParseError::MissingToken("edge label"))?.to_string();
        let lx = parse_number(s2.ok_or(ParseError::MissingToken("edge label x"))?)?;
        let ly = parse_number(s3.ok_or(ParseError::MissingToken("edge label y"))?)?;
        let slot = s5.ok_or(ParseError::MissingToken("edge color"))?;
        (
            Some(EdgeLabel {
                text,
                position: Vec2::new(lx, ly),
            }),
            slot,
        )
    } else {
        (None, s2.ok_or(ParseError::MissingToken("edge color"))?)
    };

    let stroke = match edge_colors {
        Some(table) => {
            let id = color::decode(color_slot)
                .ok_or_else(|| ParseError::BadColor(color_slot.to_string()))?;
            *table.get(&id).ok_or(ParseError::UnknownEdgeId(id))?
        }
        None => decode_color(color_slot)?,
    };

    Ok(Edge {
        points,
        tail,
        head,
        label,
        stroke,
    })
}

fn parse_number(token: &str) -> Result<f32, ParseError> {
    token
        .parse::<f32>()
        .map_err(|_| ParseError::BadNumber(token.to_string()))
}
