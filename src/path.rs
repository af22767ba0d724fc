//! Path construction: `d` attribute parsing and shape primitives.
//!
//! Every produced sub-contour is treated as closed downstream; polygons
//! and polylines are force-closed here because every extracted region
//! must support fill and containment.

use crate::geometry::limits;
use crate::model::{Path, Segment, SubPath, Vec2};

const KAPPA: f32 = 0.5522847498;

/// Parse SVG path data. Supports `M L H V C S Q T A Z` and their
/// relative forms; extra pairs after a move-to are implicit line-tos.
/// Empty or unparsable input yields an empty path; a malformed tail
/// stops the scan and keeps what was built before it.
pub fn from_path_data(d: &str) -> Path {
    if d.len() > limits::MAX_PATH_DATA_LEN {
        return Path::default();
    }
    let mut p = PathScanner::new(d);
    p.run();
    p.finish()
}

struct PathScanner<'a> {
    bytes: &'a [u8],
    i: usize,
    cur: Vec2,
    start_sub: Vec2,
    sub: Option<SubPath>,
    subpaths: Vec<SubPath>,
    last_cmd: u8,
    // reflection sources for S/T
    prev_cubic_ctrl: Option<Vec2>,
    prev_quad_ctrl: Option<Vec2>,
    cmd_count: usize,
    seg_count: usize,
    done: bool,
}

impl<'a> PathScanner<'a> {
    fn new(d: &'a str) -> PathScanner<'a> {
        PathScanner {
            bytes: d.as_bytes(),
            i: 0,
            cur: Vec2 { x: 0.0, y: 0.0 },
            start_sub: Vec2 { x: 0.0, y: 0.0 },
            sub: None,
            subpaths: Vec::new(),
            last_cmd: 0,
            prev_cubic_ctrl: None,
            prev_quad_ctrl: None,
            cmd_count: 0,
            seg_count: 0,
            done: false,
        }
    }

    fn skip_ws(&mut self) {
        while self.i < self.bytes.len() {
            let c = self.bytes[self.i];
            if c == b' ' || c == b'\n' || c == b'\r' || c == b'\t' || c == b',' {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    fn num(&mut self) -> Option<f32> {
        self.skip_ws();
        let start = self.i;
        let mut had = false;
        while self.i < self.bytes.len() {
            let c = self.bytes[self.i];
            let is_sign = (c == b'-' || c == b'+') && self.i > start && {
                let prev = self.bytes[self.i - 1];
                prev != b'e' && prev != b'E'
            };
            if is_sign {
                // a sign mid-number starts the next token
                break;
            }
            if c.is_ascii_digit() || c == b'.' || c == b'-' || c == b'+' || c == b'e' || c == b'E' {
                had = true;
                self.i += 1;
            } else {
                break;
            }
        }
        if !had {
            return None;
        }
        let s = std::str::from_utf8(&self.bytes[start..self.i]).ok()?;
        let v = s.parse::<f32>().ok()?;
        if limits::in_coord_bounds(v) {
            Some(v)
        } else {
            None
        }
    }

    fn pair(&mut self) -> Option<Vec2> {
        let x = self.num()?;
        let y = self.num()?;
        Some(Vec2 { x, y })
    }

    fn rel(&self, p: Vec2, relative: bool) -> Vec2 {
        if relative {
            Vec2 { x: p.x + self.cur.x, y: p.y + self.cur.y }
        } else {
            p
        }
    }

    fn push_seg(&mut self, seg: Segment) {
        self.seg_count += 1;
        if self.seg_count > limits::MAX_SEGMENTS {
            self.done = true;
            return;
        }
        let end = seg.end();
        if let Some(sub) = self.sub.as_mut() {
            sub.segments.push(seg);
        } else {
            // data began without a move-to; open a sub-contour at the origin
            self.sub = Some(SubPath { start: self.cur, segments: vec![seg] });
            self.start_sub = self.cur;
        }
        self.cur = end;
    }

    fn close_sub(&mut self) {
        if let Some(sub) = self.sub.take() {
            if !sub.segments.is_empty() {
                self.subpaths.push(sub);
            }
        }
    }

    fn begin_sub(&mut self, at: Vec2) -> bool {
        self.close_sub();
        if self.subpaths.len() >= limits::MAX_SUBPATHS {
            self.done = true;
            return false;
        }
        self.sub = Some(SubPath { start: at, segments: Vec::new() });
        self.cur = at;
        self.start_sub = at;
        true
    }

    fn run(&mut self) {
        while !self.done && self.i < self.bytes.len() {
            self.skip_ws();
            if self.i >= self.bytes.len() {
                break;
            }
            let c = self.bytes[self.i];
            let cmd = if c.is_ascii_alphabetic() {
                self.i += 1;
                c
            } else if self.last_cmd != 0 {
                self.last_cmd
            } else {
                return;
            };
            self.cmd_count += 1;
            if self.cmd_count > limits::MAX_PATH_COMMANDS {
                return;
            }
            let before = self.i;
            self.step(cmd);
            if self.i == before && !c.is_ascii_alphabetic() {
                // no progress on a repeated command: malformed tail
                return;
            }
        }
    }

    fn step(&mut self, cmd: u8) {
        let relative = cmd.is_ascii_lowercase();
        match cmd {
            b'M' | b'm' => {
                let Some(p) = self.pair() else { self.last_cmd = 0; return };
                let at = self.rel(p, relative);
                if !self.begin_sub(at) {
                    return;
                }
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                // following pairs are implicit line-tos with the same relativity
                self.last_cmd = if relative { b'l' } else { b'L' };
            }
            b'L' | b'l' => {
                let Some(p) = self.pair() else { self.last_cmd = 0; return };
                let to = self.rel(p, relative);
                self.push_seg(Segment::Line { to });
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'H' | b'h' => {
                let Some(x) = self.num() else { self.last_cmd = 0; return };
                let to = Vec2 { x: if relative { self.cur.x + x } else { x }, y: self.cur.y };
                self.push_seg(Segment::Line { to });
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'V' | b'v' => {
                let Some(y) = self.num() else { self.last_cmd = 0; return };
                let to = Vec2 { x: self.cur.x, y: if relative { self.cur.y + y } else { y } };
                self.push_seg(Segment::Line { to });
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'C' | b'c' => {
                let (Some(p1), Some(p2), Some(p3)) = (self.pair(), self.pair(), self.pair()) else {
                    self.last_cmd = 0;
                    return;
                };
                let c1 = self.rel(p1, relative);
                let c2 = self.rel(p2, relative);
                let to = self.rel(p3, relative);
                self.push_seg(Segment::Cubic { c1, c2, to });
                self.prev_cubic_ctrl = Some(c2);
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'S' | b's' => {
                let (Some(p2), Some(p3)) = (self.pair(), self.pair()) else {
                    self.last_cmd = 0;
                    return;
                };
                let c1 = match self.prev_cubic_ctrl {
                    Some(prev) => Vec2 { x: 2.0 * self.cur.x - prev.x, y: 2.0 * self.cur.y - prev.y },
                    None => self.cur,
                };
                let c2 = self.rel(p2, relative);
                let to = self.rel(p3, relative);
                self.push_seg(Segment::Cubic { c1, c2, to });
                self.prev_cubic_ctrl = Some(c2);
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'Q' | b'q' => {
                let (Some(p1), Some(p2)) = (self.pair(), self.pair()) else {
                    self.last_cmd = 0;
                    return;
                };
                let ctrl = self.rel(p1, relative);
                let to = self.rel(p2, relative);
                self.push_seg(Segment::Quad { ctrl, to });
                self.prev_quad_ctrl = Some(ctrl);
                self.prev_cubic_ctrl = None;
                self.last_cmd = cmd;
            }
            b'T' | b't' => {
                let Some(p) = self.pair() else { self.last_cmd = 0; return };
                let ctrl = match self.prev_quad_ctrl {
                    Some(prev) => Vec2 { x: 2.0 * self.cur.x - prev.x, y: 2.0 * self.cur.y - prev.y },
                    None => self.cur,
                };
                let to = self.rel(p, relative);
                self.push_seg(Segment::Quad { ctrl, to });
                self.prev_quad_ctrl = Some(ctrl);
                self.prev_cubic_ctrl = None;
                self.last_cmd = cmd;
            }
            b'A' | b'a' => {
                let (Some(rx), Some(ry), Some(xrot), Some(laf), Some(swf)) =
                    (self.num(), self.num(), self.num(), self.num(), self.num())
                else {
                    self.last_cmd = 0;
                    return;
                };
                let Some(p) = self.pair() else { self.last_cmd = 0; return };
                let to = self.rel(p, relative);
                let from = self.cur;
                let mut segs = Vec::new();
                arc_to_cubics(&mut segs, from, rx, ry, xrot, laf != 0.0, swf != 0.0, to);
                for seg in segs {
                    self.push_seg(seg);
                }
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            b'Z' | b'z' => {
                let start = self.start_sub;
                let off = (self.cur.x - start.x).abs().max((self.cur.y - start.y).abs());
                if off > crate::geometry::tolerance::EPS_POS {
                    self.push_seg(Segment::Line { to: start });
                }
                self.cur = start;
                self.prev_cubic_ctrl = None;
                self.prev_quad_ctrl = None;
                self.last_cmd = cmd;
            }
            _ => {
                // unrecognized command: stop the scan, keep what we have
                self.last_cmd = 0;
                self.done = true;
            }
        }
    }

    fn finish(mut self) -> Path {
        self.close_sub();
        Path { subpaths: self.subpaths }
    }
}

/// Approximate an elliptical arc with cubic spans of at most 90 degrees
/// (endpoint parameterization to center parameterization, then one
/// Bézier per span).
fn arc_to_cubics(
    out: &mut Vec<Segment>,
    from: Vec2,
    rx: f32,
    ry: f32,
    xrot_deg: f32,
    large_arc: bool,
    sweep: bool,
    to: Vec2,
) {
    use std::f32::consts::{FRAC_PI_2, TAU};

    if (from.x - to.x).abs() < 1e-6 && (from.y - to.y).abs() < 1e-6 {
        return;
    }
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx < 1e-6 || ry < 1e-6 {
        out.push(Segment::Line { to });
        return;
    }
    let phi = xrot_deg.to_radians();
    let (sinp, cosp) = phi.sin_cos();
    let dx2 = (from.x - to.x) * 0.5;
    let dy2 = (from.y - to.y) * 0.5;
    let x1p = cosp * dx2 + sinp * dy2;
    let y1p = -sinp * dx2 + cosp * dy2;
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }
    let num = (rx * rx) * (ry * ry) - (rx * rx) * (y1p * y1p) - (ry * ry) * (x1p * x1p);
    let den = (rx * rx) * (y1p * y1p) + (ry * ry) * (x1p * x1p);
    let mut coef = if den > 0.0 { (num / den).max(0.0).sqrt() } else { 0.0 };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;
    let cx = cosp * cxp - sinp * cyp + (from.x + to.x) * 0.5;
    let cy = sinp * cxp + cosp * cyp + (from.y + to.y) * 0.5;

    let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
    let mut dtheta = theta2 - theta1;
    if !sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if sweep && dtheta < 0.0 {
        dtheta += TAU;
    }

    let n = ((dtheta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = dtheta / n as f32;
    let alpha = 4.0 / 3.0 * (step * 0.25).tan();

    let point_at = |t: f32| -> Vec2 {
        let (sint, cost) = t.sin_cos();
        Vec2 {
            x: cx + rx * cost * cosp - ry * sint * sinp,
            y: cy + rx * cost * sinp + ry * sint * cosp,
        }
    };
    let deriv_at = |t: f32| -> Vec2 {
        let (sint, cost) = t.sin_cos();
        Vec2 {
            x: -rx * sint * cosp - ry * cost * sinp,
            y: -rx * sint * sinp + ry * cost * cosp,
        }
    };

    let mut t = theta1;
    let mut p0 = from;
    for k in 0..n {
        let t2 = t + step;
        let end = if k == n - 1 { to } else { point_at(t2) };
        let d1 = deriv_at(t);
        let d2 = deriv_at(t2);
        out.push(Segment::Cubic {
            c1: Vec2 { x: p0.x + alpha * d1.x, y: p0.y + alpha * d1.y },
            c2: Vec2 { x: end.x - alpha * d2.x, y: end.y - alpha * d2.y },
            to: end,
        });
        t = t2;
        p0 = end;
    }
}

pub fn from_rect(x: f32, y: f32, w: f32, h: f32) -> Path {
    Path {
        subpaths: vec![SubPath {
            start: Vec2 { x, y },
            segments: vec![
                Segment::Line { to: Vec2 { x: x + w, y } },
                Segment::Line { to: Vec2 { x: x + w, y: y + h } },
                Segment::Line { to: Vec2 { x, y: y + h } },
                Segment::Line { to: Vec2 { x, y } },
            ],
        }],
    }
}

pub fn from_circle(cx: f32, cy: f32, r: f32) -> Path {
    from_ellipse(cx, cy, r, r)
}

/// Standard 4-cubic oval approximation, one closed sub-contour.
pub fn from_ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Path {
    let kx = KAPPA * rx;
    let ky = KAPPA * ry;
    let right = Vec2 { x: cx + rx, y: cy };
    let top = Vec2 { x: cx, y: cy - ry };
    let left = Vec2 { x: cx - rx, y: cy };
    let bottom = Vec2 { x: cx, y: cy + ry };
    Path {
        subpaths: vec![SubPath {
            start: right,
            segments: vec![
                Segment::Cubic {
                    c1: Vec2 { x: right.x, y: right.y - ky },
                    c2: Vec2 { x: top.x + kx, y: top.y },
                    to: top,
                },
                Segment::Cubic {
                    c1: Vec2 { x: top.x - kx, y: top.y },
                    c2: Vec2 { x: left.x, y: left.y - ky },
                    to: left,
                },
                Segment::Cubic {
                    c1: Vec2 { x: left.x, y: left.y + ky },
                    c2: Vec2 { x: bottom.x - kx, y: bottom.y },
                    to: bottom,
                },
                Segment::Cubic {
                    c1: Vec2 { x: bottom.x + kx, y: bottom.y },
                    c2: Vec2 { x: right.x, y: right.y + ky },
                    to: right,
                },
            ],
        }],
    }
}

/// Polygon/polyline point sequence, force-closed back to the first point.
pub fn from_points(points: &[Vec2]) -> Path {
    if points.len() < 2 {
        return Path::default();
    }
    let start = points[0];
    let mut segments: Vec<Segment> = points[1..]
        .iter()
        .map(|&to| Segment::Line { to })
        .collect();
    let last = points[points.len() - 1];
    let off = (last.x - start.x).abs().max((last.y - start.y).abs());
    if off > crate::geometry::tolerance::EPS_POS {
        segments.push(Segment::Line { to: start });
    }
    Path { subpaths: vec![SubPath { start, segments }] }
}

/// Parse a `points` attribute into coordinate pairs; a trailing odd
/// number is dropped.
pub fn parse_points(s: &str) -> Vec<Vec2> {
    let nums: Vec<f32> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map_while(|t| t.parse::<f32>().ok().filter(|v| limits::in_coord_bounds(*v)))
        .take(limits::MAX_POLY_POINTS * 2)
        .collect();
    nums.chunks_exact(2)
        .map(|c| Vec2 { x: c[0], y: c[1] })
        .collect()
}

/// Serialize back to path data for painters that consume `d` strings.
pub fn to_path_data(path: &Path) -> String {
    let mut d = String::new();
    for sub in &path.subpaths {
        if !d.is_empty() {
            d.push(' ');
        }
        d.push_str(&format!("M {} {}", sub.start.x, sub.start.y));
        for seg in &sub.segments {
            match *seg {
                Segment::Line { to } => d.push_str(&format!(" L {} {}", to.x, to.y)),
                Segment::Quad { ctrl, to } => {
                    d.push_str(&format!(" Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y))
                }
                Segment::Cubic { c1, c2, to } => d.push_str(&format!(
                    " C {} {} {} {} {} {}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                )),
            }
        }
        d.push_str(" Z");
    }
    d
}
