//! Adaptive label placement.
//!
//! Picks a font size and anchor for a region's numeral such that the
//! rendered text's bounding box sits entirely inside the region
//! geometry, not just its bounding rectangle. The size target follows
//! the external zoom factor; when strict containment is impossible the
//! engine degrades to an unconstrained fallback so every fillable
//! region still shows an indicator. Text metrics are a fixed-aspect
//! approximation (numerals only; real fonts live in the renderer).

use crate::geometry::tolerance::clamp;
use crate::model::{Region, Vec2};

pub const BASE_FONT_SIZE_SCREEN: f32 = 16.0;
pub const MIN_VISIBLE_FONT_SIZE: f32 = 5.0;
pub const RELAXED_MIN_FONT_SIZE: f32 = 3.0;
pub const MAX_FONT_SIZE: f32 = 40.0;

const INSET_MARGIN: f32 = 0.15; // fraction of the bbox trimmed per edge
const GRID_STEPS: usize = 6;
const SHRINK_STEP: f32 = 0.25;
const FIT_START_FRACTION: f32 = 0.40;
const RELAXED_BBOX_DIM: f32 = 10.0; // below this, retry with the relaxed minimum
const MIN_LABEL_BBOX_DIM: f32 = 1.0; // at or below this, no label at all
const FALLBACK_SIZE_FRACTION: f32 = 0.5;
const MIN_FALLBACK_FONT_SIZE: f32 = 2.0;
const CHAR_ADVANCE_EM: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub font_size: f32,
    pub anchor: Vec2,
    /// False for the unconstrained fallback; the caller may need to
    /// suppress clipping when drawing it.
    pub contained: bool,
}

#[derive(Clone, Copy)]
struct InsetBox {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

fn measure(text: &str, font_size: f32) -> (f32, f32) {
    let chars = text.chars().count() as f32;
    (font_size * CHAR_ADVANCE_EM * chars, font_size)
}

/// Place `text` inside the region at the given zoom. Returns `None`
/// only for geometries whose bounding box is 1 unit or less in either
/// dimension; every other region gets a placement, strictly contained
/// when possible.
pub fn place_label(region: &Region, zoom_scale: f32, text: &str) -> Option<LabelPlacement> {
    let (minx, miny, maxx, maxy) = region.bbox;
    let bw = maxx - minx;
    let bh = maxy - miny;
    if bw <= MIN_LABEL_BBOX_DIM || bh <= MIN_LABEL_BBOX_DIM {
        return None;
    }

    let zoom = if zoom_scale > 0.0 { zoom_scale } else { 1.0 };
    let desired = clamp(
        BASE_FONT_SIZE_SCREEN / zoom,
        MIN_VISIBLE_FONT_SIZE,
        MAX_FONT_SIZE,
    );

    let inset = InsetBox {
        x: minx + bw * INSET_MARGIN,
        y: miny + bh * INSET_MARGIN,
        w: bw * (1.0 - 2.0 * INSET_MARGIN),
        h: bh * (1.0 - 2.0 * INSET_MARGIN),
    };

    let candidates = candidate_anchors(region, &inset);

    let mut min_sizes = vec![MIN_VISIBLE_FONT_SIZE];
    if bw < RELAXED_BBOX_DIM || bh < RELAXED_BBOX_DIM {
        min_sizes.push(RELAXED_MIN_FONT_SIZE);
    }
    for min_size in min_sizes {
        for &anchor in &candidates {
            if let Some(font_size) = fit_font_size(text, anchor, &inset, region, desired, min_size)
            {
                return Some(LabelPlacement { font_size, anchor, contained: true });
            }
        }
    }

    // Unconstrained fallback: slivers still get some indicator.
    let anchor = Vec2 { x: (minx + maxx) * 0.5, y: (miny + maxy) * 0.5 };
    let font_size = clamp(
        FALLBACK_SIZE_FRACTION * bw.min(bh),
        MIN_FALLBACK_FONT_SIZE,
        MAX_FONT_SIZE,
    );
    Some(LabelPlacement { font_size, anchor, contained: false })
}

/// Candidate anchors, best first: the inset-box center when it lies
/// inside the geometry, else interior grid points of the inset box,
/// else the plain bbox center as a last resort.
fn candidate_anchors(region: &Region, inset: &InsetBox) -> Vec<Vec2> {
    let center = Vec2 { x: inset.x + inset.w * 0.5, y: inset.y + inset.h * 0.5 };
    if region.contains(center.x, center.y) {
        return vec![center];
    }

    let mut grid = Vec::new();
    for j in 0..GRID_STEPS {
        for i in 0..GRID_STEPS {
            let p = Vec2 {
                x: inset.x + inset.w * (i as f32 + 0.5) / GRID_STEPS as f32,
                y: inset.y + inset.h * (j as f32 + 0.5) / GRID_STEPS as f32,
            };
            if region.contains(p.x, p.y) {
                grid.push(p);
            }
        }
    }
    if !grid.is_empty() {
        return grid;
    }

    let (minx, miny, maxx, maxy) = region.bbox;
    let bbox_center = Vec2 { x: (minx + maxx) * 0.5, y: (miny + maxy) * 0.5 };
    if region.contains(bbox_center.x, bbox_center.y) {
        return vec![bbox_center];
    }
    Vec::new()
}

/// Largest size not above `desired` whose centered text box fits the
/// inset bounds with all four corners inside the geometry, shrinking in
/// fixed steps down to `min_size`.
fn fit_font_size(
    text: &str,
    anchor: Vec2,
    inset: &InsetBox,
    region: &Region,
    desired: f32,
    min_size: f32,
) -> Option<f32> {
    let start = clamp(
        desired.min(FIT_START_FRACTION * inset.w.min(inset.h)),
        min_size,
        MAX_FONT_SIZE,
    );
    let mut size = start;
    while size >= min_size {
        let (w, h) = measure(text, size);
        if w <= inset.w && h <= inset.h {
            let x0 = anchor.x - w * 0.5;
            let y0 = anchor.y - h * 0.5;
            let x1 = anchor.x + w * 0.5;
            let y1 = anchor.y + h * 0.5;
            let in_inset =
                x0 >= inset.x && y0 >= inset.y && x1 <= inset.x + inset.w && y1 <= inset.y + inset.h;
            if in_inset
                && region.contains(x0, y0)
                && region.contains(x1, y0)
                && region.contains(x0, y1)
                && region.contains(x1, y1)
            {
                return Some(size);
            }
        }
        size -= SHRINK_STEP;
    }
    None
}
