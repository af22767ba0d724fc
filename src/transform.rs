//! Transform attribute parsing and 2-D affine composition.
//!
//! A transform string may carry `translate`, `scale`, `rotate` and
//! `matrix` calls. They multiply into the running matrix in that fixed
//! order regardless of where they appear in the string (first occurrence
//! of each function wins); this matches the tool this corpus targets,
//! not the general transform-list grammar.

use crate::model::{Path, Segment, SubPath, Vec2};

/// 2-D affine transform: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn translate(tx: f32, ty: f32) -> Transform {
        Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    pub fn scale(sx: f32, sy: f32) -> Transform {
        Transform { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    pub fn rotate_deg(deg: f32) -> Transform {
        let (sin, cos) = deg.to_radians().sin_cos();
        Transform { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Rotation about a center: translate, rotate, inverse-translate.
    pub fn rotate_about(deg: f32, cx: f32, cy: f32) -> Transform {
        Transform::translate(cx, cy)
            .then(&Transform::rotate_deg(deg))
            .then(&Transform::translate(-cx, -cy))
    }

    pub fn matrix(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Transform {
        Transform { a, b, c, d, e, f }
    }

    /// Compose with a child transform; `other` applies to points first.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    pub fn apply_point(&self, p: Vec2) -> Vec2 {
        let (x, y) = self.apply(p.x, p.y);
        Vec2 { x, y }
    }

    /// Map a path into this transform's target space. Affine maps take
    /// Bézier control polygons to control polygons, so segments map
    /// point-wise.
    pub fn apply_path(&self, path: &Path) -> Path {
        let subpaths = path
            .subpaths
            .iter()
            .map(|sub| SubPath {
                start: self.apply_point(sub.start),
                segments: sub
                    .segments
                    .iter()
                    .map(|seg| match *seg {
                        Segment::Line { to } => Segment::Line { to: self.apply_point(to) },
                        Segment::Quad { ctrl, to } => Segment::Quad {
                            ctrl: self.apply_point(ctrl),
                            to: self.apply_point(to),
                        },
                        Segment::Cubic { c1, c2, to } => Segment::Cubic {
                            c1: self.apply_point(c1),
                            c2: self.apply_point(c2),
                            to: self.apply_point(to),
                        },
                    })
                    .collect(),
            })
            .collect();
        Path { subpaths }
    }
}

/// Parse a transform attribute. Unrecognized or malformed calls
/// contribute identity; malformed numeric arguments fall back per
/// component (0 for translate/rotate, 1 for scale).
pub fn parse_transform(s: &str) -> Transform {
    let mut m = Transform::IDENTITY;
    if let Some(args) = func_args(s, "translate") {
        let tx = arg(&args, 0).unwrap_or(0.0);
        let ty = arg(&args, 1).unwrap_or(0.0);
        m = m.then(&Transform::translate(tx, ty));
    }
    if let Some(args) = func_args(s, "scale") {
        let sx = arg(&args, 0).unwrap_or(1.0);
        let sy = arg(&args, 1).unwrap_or(sx);
        m = m.then(&Transform::scale(sx, sy));
    }
    if let Some(args) = func_args(s, "rotate") {
        let ang = arg(&args, 0).unwrap_or(0.0);
        let local = match (arg(&args, 1), arg(&args, 2)) {
            (Some(cx), Some(cy)) => Transform::rotate_about(ang, cx, cy),
            _ => Transform::rotate_deg(ang),
        };
        m = m.then(&local);
    }
    if let Some(args) = func_args(s, "matrix") {
        let id = Transform::IDENTITY;
        m = m.then(&Transform::matrix(
            arg(&args, 0).unwrap_or(id.a),
            arg(&args, 1).unwrap_or(id.b),
            arg(&args, 2).unwrap_or(id.c),
            arg(&args, 3).unwrap_or(id.d),
            arg(&args, 4).unwrap_or(id.e),
            arg(&args, 5).unwrap_or(id.f),
        ));
    }
    m
}

fn arg(args: &[Option<f32>], i: usize) -> Option<f32> {
    args.get(i).copied().flatten()
}

/// Argument list of the first `name(...)` call in `s`, each token parsed
/// independently so one bad number does not discard its neighbors.
fn func_args(s: &str, name: &str) -> Option<Vec<Option<f32>>> {
    let mut from = 0;
    loop {
        let at = s[from..].find(name)? + from;
        // Reject substring hits like "xtranslate".
        let boundary = at == 0
            || !s[..at]
                .chars()
                .next_back()
                .map(|c| c.is_ascii_alphanumeric())
                .unwrap_or(false);
        let rest = &s[at + name.len()..];
        let after_ws = rest.trim_start();
        if boundary && after_ws.starts_with('(') {
            let inner = &after_ws[1..];
            let body = match inner.find(')') {
                Some(end) => &inner[..end],
                None => inner,
            };
            let args = body
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| t.parse::<f32>().ok().filter(|v| v.is_finite()))
                .collect();
            return Some(args);
        }
        from = at + name.len();
        if from >= s.len() {
            return None;
        }
    }
}
