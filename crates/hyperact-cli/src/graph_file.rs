//! Line-oriented 2D pose graph files.
//!
//! ```text
//! # comment
//! VERTEX_XY <id> <x> <y>
//! EDGE_XY <from> <to>
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use hyperact_core::{Element, ElementGraph, Error, Result};

pub const VERTEX_XY: &str = "VERTEX_XY";
pub const EDGE_XY: &str = "EDGE_XY";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexXY {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Element for VertexXY {
    fn type_tag(&self) -> &str {
        VERTEX_XY
    }
}

/// Edge between two vertices, with the endpoint positions captured at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeXY {
    pub from: u32,
    pub to: u32,
    pub from_xy: (f64, f64),
    pub to_xy: (f64, f64),
}

impl Element for EdgeXY {
    fn type_tag(&self) -> &str {
        EDGE_XY
    }
}

pub fn load_graph(path: impl AsRef<Path>) -> Result<ElementGraph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| {
        Error::from(err)
            .with_operation("graph_file::load_graph")
            .with_context("path", path.display().to_string())
    })?;
    parse_graph(&text).map_err(|err| err.with_context("path", path.display().to_string()))
}

/// Build a graph from file contents. Edges may only name vertices defined above them.
pub fn parse_graph(text: &str) -> Result<ElementGraph> {
    let mut graph = ElementGraph::new();
    let mut positions: HashMap<u32, (f64, f64)> = HashMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let tag = fields.next().unwrap_or_default();
        let fail = |err: Error| {
            err.with_operation("graph_file::parse_graph")
                .with_context("line", line_no.to_string())
        };

        match tag {
            VERTEX_XY => {
                let id: u32 = next_field(&mut fields, "id").map_err(fail)?;
                let x: f64 = next_field(&mut fields, "x").map_err(fail)?;
                let y: f64 = next_field(&mut fields, "y").map_err(fail)?;
                positions.insert(id, (x, y));
                graph.add_vertex(Box::new(VertexXY { id, x, y }));
            }
            EDGE_XY => {
                let from: u32 = next_field(&mut fields, "from").map_err(fail)?;
                let to: u32 = next_field(&mut fields, "to").map_err(fail)?;
                let from_xy = position(&positions, from).map_err(fail)?;
                let to_xy = position(&positions, to).map_err(fail)?;
                graph.add_edge(Box::new(EdgeXY {
                    from,
                    to,
                    from_xy,
                    to_xy,
                }));
            }
            other => {
                return Err(fail(Error::parse_failed(format!(
                    "unknown record '{}'",
                    other
                ))));
            }
        }
    }

    Ok(graph)
}

fn next_field<'a, T: FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<T> {
    let raw = fields
        .next()
        .ok_or_else(|| Error::parse_failed(format!("missing field '{}'", what)))?;
    raw.parse()
        .map_err(|_| Error::parse_failed(format!("invalid {} '{}'", what, raw)))
}

fn position(positions: &HashMap<u32, (f64, f64)>, id: u32) -> Result<(f64, f64)> {
    positions
        .get(&id)
        .copied()
        .ok_or_else(|| Error::element_not_found(id.to_string()))
}
