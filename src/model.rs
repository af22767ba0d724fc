use serde::{Deserialize, Serialize};

use crate::algorithms::winding;
use crate::geometry::flatten;
use crate::geometry::tolerance::FLATTEN_TOL;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// One drawing step of a sub-contour; the start point is the previous
/// segment's end (or the sub-contour start).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Line { to: Vec2 },
    Quad { ctrl: Vec2, to: Vec2 },
    Cubic { c1: Vec2, c2: Vec2, to: Vec2 },
}

impl Segment {
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line { to } => to,
            Segment::Quad { to, .. } => to,
            Segment::Cubic { to, .. } => to,
        }
    }
}

/// A sub-contour, implicitly closed (last point connects back to `start`)
/// for fill and containment purposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubPath {
    pub start: Vec2,
    pub segments: Vec<Segment>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub subpaths: Vec<SubPath>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }
}

/// A fillable shape extracted from the document, tagged with its palette
/// index. Geometry is immutable after construction; only the fill state
/// and displayed color change, each exactly once.
#[derive(Clone, Debug)]
pub struct Region {
    pub id: u32,
    pub color_id: u32,
    pub path: Path,
    pub rings: Vec<Vec<Vec2>>,
    pub bbox: (f32, f32, f32, f32),
    pub filled: bool,
    pub current_color: Color,
}

impl Region {
    /// Build a region from its global-space geometry. Returns `None` when
    /// the geometry flattens to nothing usable for containment.
    pub fn new(id: u32, color_id: u32, path: Path) -> Option<Region> {
        let rings = flatten::flatten_path(&path, FLATTEN_TOL);
        let bbox = rings_bbox(&rings)?;
        Some(Region {
            id,
            color_id,
            path,
            rings,
            bbox,
            filled: false,
            current_color: Color::WHITE,
        })
    }

    /// Containment predicate over the filled interior (non-zero rule
    /// across all sub-contours).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (minx, miny, maxx, maxy) = self.bbox;
        if x < minx || x > maxx || y < miny || y > maxy {
            return false;
        }
        winding::point_in_rings(x, y, &self.rings)
    }
}

fn rings_bbox(rings: &[Vec<Vec2>]) -> Option<(f32, f32, f32, f32)> {
    let mut minx = f32::INFINITY;
    let mut miny = f32::INFINITY;
    let mut maxx = f32::NEG_INFINITY;
    let mut maxy = f32::NEG_INFINITY;
    for ring in rings {
        for p in ring {
            if p.x < minx {
                minx = p.x;
            }
            if p.x > maxx {
                maxx = p.x;
            }
            if p.y < miny {
                miny = p.y;
            }
            if p.y > maxy {
                maxy = p.y;
            }
        }
    }
    if minx.is_finite() && miny.is_finite() {
        Some((minx, miny, maxx, maxy))
    } else {
        None
    }
}
