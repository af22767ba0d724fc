//! Document ingestion: walk the markup tree into regions and a palette.
//!
//! Depth-first pre-order traversal with an accumulated transform. Shape
//! nodes with a resolvable, non-transparent fill become regions in
//! global coordinates; containers only contribute their transform.
//! Everything short of malformed markup degrades per node.

use std::collections::HashMap;

use roxmltree::Node;
use tracing::{debug, trace};

use crate::color;
use crate::error::Result;
use crate::model::{Color, Path, Region, Vec2};
use crate::path;
use crate::transform::{self, Transform};
use crate::Artwork;

const DEFAULT_CANVAS: f32 = 500.0;

pub(crate) fn parse(bytes: &[u8]) -> Result<Artwork> {
    let text = std::str::from_utf8(bytes)?;
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    let (width, height) = canvas_size(&root);

    // All counters live on the session so repeated parses are independent.
    let mut session = WalkSession::default();
    session.visit(root, Transform::IDENTITY);

    debug!(
        regions = session.regions.len(),
        colors = session.palette.len(),
        "document ingested"
    );
    Ok(Artwork::from_parts(width, height, session.regions, session.palette))
}

#[derive(Default)]
struct WalkSession {
    regions: Vec<Region>,
    palette: Vec<Color>,
    color_ids: HashMap<String, u32>,
}

impl WalkSession {
    fn visit(&mut self, node: Node, inherited: Transform) {
        let local = node
            .attribute("transform")
            .map(transform::parse_transform)
            .unwrap_or(Transform::IDENTITY);
        let composed = inherited.then(&local);

        if let Some(shape) = build_shape(&node) {
            self.record(&node, shape, &composed);
        }
        for child in node.children() {
            if child.is_element() {
                self.visit(child, composed);
            }
        }
    }

    fn record(&mut self, node: &Node, shape: Path, composed: &Transform) {
        let Some(token) = node.attribute("fill") else {
            trace!(elem = node.tag_name().name(), "no fill, shape skipped");
            return;
        };
        let rgba = color::resolve_fill(token);
        if rgba.is_transparent() {
            trace!(elem = node.tag_name().name(), "transparent fill, shape skipped");
            return;
        }
        if shape.is_empty() {
            trace!(elem = node.tag_name().name(), "empty geometry, shape skipped");
            return;
        }
        let global = composed.apply_path(&shape);
        let id = self.regions.len() as u32 + 1;
        // Palette index allocation waits until the region is known good,
        // so no palette entry can end up with zero regions.
        let Some(mut region) = Region::new(id, 0, global) else {
            trace!(elem = node.tag_name().name(), "degenerate geometry, shape skipped");
            return;
        };
        region.color_id = self.color_id_for(token, rgba);
        self.regions.push(region);
    }

    /// First occurrence of a normalized fill token allocates the next
    /// sequential palette index; case and whitespace variants collapse.
    fn color_id_for(&mut self, token: &str, rgba: Color) -> u32 {
        let key = token.trim().to_ascii_lowercase();
        if let Some(&id) = self.color_ids.get(&key) {
            return id;
        }
        self.palette.push(rgba);
        let id = self.palette.len() as u32;
        self.color_ids.insert(key, id);
        id
    }
}

fn build_shape(node: &Node) -> Option<Path> {
    match node.tag_name().name() {
        "path" => node.attribute("d").map(path::from_path_data),
        "rect" => {
            let w = attr_f32(node, "width").filter(|w| *w > 0.0)?;
            let h = attr_f32(node, "height").filter(|h| *h > 0.0)?;
            let x = attr_f32(node, "x").unwrap_or(0.0);
            let y = attr_f32(node, "y").unwrap_or(0.0);
            Some(path::from_rect(x, y, w, h))
        }
        "circle" => {
            let r = attr_f32(node, "r").filter(|r| *r > 0.0)?;
            let cx = attr_f32(node, "cx").unwrap_or(0.0);
            let cy = attr_f32(node, "cy").unwrap_or(0.0);
            Some(path::from_circle(cx, cy, r))
        }
        "ellipse" => {
            let rx = attr_f32(node, "rx").filter(|r| *r > 0.0)?;
            let ry = attr_f32(node, "ry").filter(|r| *r > 0.0)?;
            let cx = attr_f32(node, "cx").unwrap_or(0.0);
            let cy = attr_f32(node, "cy").unwrap_or(0.0);
            Some(path::from_ellipse(cx, cy, rx, ry))
        }
        "polygon" | "polyline" => {
            let pts: Vec<Vec2> = path::parse_points(node.attribute("points")?);
            Some(path::from_points(&pts))
        }
        other => {
            if node.has_attribute("fill") {
                debug!(elem = other, "unrecognized element, traversing children only");
            }
            None
        }
    }
}

fn attr_f32(node: &Node, name: &str) -> Option<f32> {
    node.attribute(name)?.trim().parse::<f32>().ok()
}

/// Canvas size: `viewBox` width/height fields, else explicit
/// width/height attributes (unit suffixes stripped), else 500x500.
fn canvas_size(root: &Node) -> (f32, f32) {
    if let Some(vb) = root.attribute("viewBox") {
        let nums: Vec<f32> = vb
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .filter_map(|t| t.parse::<f32>().ok())
            .collect();
        if nums.len() >= 4 && nums[2] > 0.0 && nums[3] > 0.0 {
            return (nums[2], nums[3]);
        }
    }
    let w = dim_attr(root, "width").unwrap_or(DEFAULT_CANVAS);
    let h = dim_attr(root, "height").unwrap_or(DEFAULT_CANVAS);
    (w, h)
}

fn dim_attr(root: &Node, name: &str) -> Option<f32> {
    let raw = root.attribute(name)?.trim();
    let numeric: &str = {
        let end = raw
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
            .map(|(i, _)| i)
            .unwrap_or(raw.len());
        &raw[..end]
    };
    numeric.parse::<f32>().ok().filter(|v| *v > 0.0)
}
