use crate::geometry::math::dist_point_to_seg_sq;
use crate::geometry::tolerance::{approx_eq, EPS_POS, MAX_FLATTEN_DEPTH};
use crate::model::{Path, Segment, Vec2};

pub fn flatten_cubic(points: &mut Vec<Vec2>,
    x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32,
    tol: f32, depth: u32)
{
    let d1 = dist_point_to_seg_sq(x1, y1, x0, y0, x3, y3);
    let d2 = dist_point_to_seg_sq(x2, y2, x0, y0, x3, y3);
    let tol2 = tol * tol;
    if d1.max(d2) <= tol2 || depth > MAX_FLATTEN_DEPTH {
        points.push(Vec2 { x: x3, y: y3 });
        return;
    }
    let x01 = 0.5*(x0 + x1); let y01 = 0.5*(y0 + y1);
    let x12 = 0.5*(x1 + x2); let y12 = 0.5*(y1 + y2);
    let x23 = 0.5*(x2 + x3); let y23 = 0.5*(y2 + y3);
    let x012 = 0.5*(x01 + x12); let y012 = 0.5*(y01 + y12);
    let x123 = 0.5*(x12 + x23); let y123 = 0.5*(y12 + y23);
    let x0123 = 0.5*(x012 + x123); let y0123 = 0.5*(y012 + y123);
    flatten_cubic(points, x0, y0, x01, y01, x012, y012, x0123, y0123, tol, depth+1);
    flatten_cubic(points, x0123, y0123, x123, y123, x23, y23, x3, y3, tol, depth+1);
}

pub fn flatten_quad(points: &mut Vec<Vec2>,
    x0: f32, y0: f32, cx: f32, cy: f32, x1: f32, y1: f32,
    tol: f32, depth: u32)
{
    let d = dist_point_to_seg_sq(cx, cy, x0, y0, x1, y1);
    if d <= tol * tol || depth > MAX_FLATTEN_DEPTH {
        points.push(Vec2 { x: x1, y: y1 });
        return;
    }
    let ax = 0.5*(x0 + cx); let ay = 0.5*(y0 + cy);
    let bx = 0.5*(cx + x1); let by = 0.5*(cy + y1);
    let mx = 0.5*(ax + bx); let my = 0.5*(ay + by);
    flatten_quad(points, x0, y0, ax, ay, mx, my, tol, depth+1);
    flatten_quad(points, mx, my, bx, by, x1, y1, tol, depth+1);
}

/// Flatten every sub-contour into a closed polygonal ring. Rings that
/// collapse below three vertices are dropped.
pub fn flatten_path(path: &Path, tol: f32) -> Vec<Vec<Vec2>> {
    let mut rings = Vec::with_capacity(path.subpaths.len());
    for sub in &path.subpaths {
        let mut pts = vec![sub.start];
        let mut cur = sub.start;
        for seg in &sub.segments {
            match *seg {
                Segment::Line { to } => {
                    pts.push(to);
                }
                Segment::Quad { ctrl, to } => {
                    flatten_quad(&mut pts, cur.x, cur.y, ctrl.x, ctrl.y, to.x, to.y, tol, 0);
                }
                Segment::Cubic { c1, c2, to } => {
                    flatten_cubic(&mut pts, cur.x, cur.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y, tol, 0);
                }
            }
            cur = seg.end();
        }
        // Winding treats rings as closed; drop an explicit closing vertex.
        if pts.len() > 1 {
            let first = pts[0];
            let last = pts[pts.len() - 1];
            if approx_eq(first.x, last.x, EPS_POS) && approx_eq(first.y, last.y, EPS_POS) {
                pts.pop();
            }
        }
        if pts.len() >= 3 {
            rings.push(pts);
        }
    }
    rings
}
