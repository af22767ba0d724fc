//! Paint-by-number core: ingest a vector document into colorable
//! regions keyed by fill color, then drive the interactive fill
//! workflow (select a palette index, tap a region, fill on match) and
//! per-frame label placement for the external renderer.

pub mod color;
pub mod error;
pub mod model;
pub mod path;
pub mod transform;
mod document;
pub mod geometry {
    pub mod flatten;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod labeling;
    pub mod picking;
    pub mod winding;
}

use serde::Serialize;

use crate::algorithms::{labeling, picking};
use crate::error::Result;
use crate::model::{Color, Region};

/// A parsed document plus the session's fill state. Regions and palette
/// are built once at parse time; fill transitions are the only mutation
/// afterwards, and each region fills at most once.
pub struct Artwork {
    width: f32,
    height: f32,
    regions: Vec<Region>,
    palette: Vec<Color>,
    selected_color: Option<u32>,
    focused_region: Option<u32>,
}

impl Artwork {
    /// Parse a document. The only fatal failure is markup that does not
    /// parse at all; every node-level problem degrades silently.
    pub fn from_svg(bytes: &[u8]) -> Result<Artwork> {
        document::parse(bytes)
    }

    pub(crate) fn from_parts(
        width: f32,
        height: f32,
        regions: Vec<Region>,
        palette: Vec<Color>,
    ) -> Artwork {
        Artwork {
            width,
            height,
            regions,
            palette,
            selected_color: None,
            focused_region: None,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region lookup by 1-based id.
    pub fn region(&self, id: u32) -> Option<&Region> {
        let idx = id.checked_sub(1)? as usize;
        self.regions.get(idx)
    }

    /// Palette colors in index order; palette index `i` is `palette()[i - 1]`.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn palette_color(&self, color_id: u32) -> Option<Color> {
        let idx = color_id.checked_sub(1)? as usize;
        self.palette.get(idx).copied()
    }

    pub fn selected_color(&self) -> Option<u32> {
        self.selected_color
    }

    pub fn focused_region(&self) -> Option<u32> {
        self.focused_region
    }

    /// Select the working palette index and drop any region focus.
    pub fn select_color(&mut self, color_id: u32) {
        self.selected_color = Some(color_id);
        self.focused_region = None;
    }

    /// Topmost region containing the point, in reverse traversal order.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        picking::hit_region(&self.regions, x, y)
    }

    /// Fill a region if it is unfilled and its palette index matches the
    /// selection. Anything else (no selection, mismatch, already filled,
    /// unknown id) is a no-op. Returns whether the region filled.
    pub fn attempt_fill(&mut self, region_id: u32) -> bool {
        let Some(selected) = self.selected_color else {
            return false;
        };
        let Some(color) = self.palette_color(selected) else {
            return false;
        };
        let Some(idx) = region_id.checked_sub(1).map(|i| i as usize) else {
            return false;
        };
        let Some(region) = self.regions.get_mut(idx) else {
            return false;
        };
        if region.filled || region.color_id != selected {
            return false;
        }
        region.filled = true;
        region.current_color = color;
        true
    }

    /// Unfilled regions of the selected color, in region-id order.
    /// Recomputed on demand, never cached.
    pub fn highlighted_regions(&self) -> Vec<u32> {
        let Some(selected) = self.selected_color else {
            return Vec::new();
        };
        self.regions
            .iter()
            .filter(|r| r.color_id == selected && !r.filled)
            .map(|r| r.id)
            .collect()
    }

    /// Move focus to the next highlighted region in id order (wrapping),
    /// or the first when the current focus is gone or unset. No-op when
    /// nothing is highlighted.
    pub fn advance_focus(&mut self) -> Option<u32> {
        let highlighted = self.highlighted_regions();
        if highlighted.is_empty() {
            return self.focused_region;
        }
        let next = match self
            .focused_region
            .and_then(|id| highlighted.iter().position(|&h| h == id))
        {
            Some(pos) => highlighted[(pos + 1) % highlighted.len()],
            None => highlighted[0],
        };
        self.focused_region = Some(next);
        self.focused_region
    }

    /// Fill every highlighted region and focus the last one filled.
    /// Returns how many regions filled.
    pub fn fill_all(&mut self) -> u32 {
        let highlighted = self.highlighted_regions();
        if highlighted.is_empty() {
            return 0;
        }
        let Some(selected) = self.selected_color else {
            return 0;
        };
        let Some(color) = self.palette_color(selected) else {
            return 0;
        };
        let mut filled = 0u32;
        for &id in &highlighted {
            if let Some(region) = self.regions.get_mut(id as usize - 1) {
                region.filled = true;
                region.current_color = color;
                filled += 1;
            }
        }
        self.focused_region = highlighted.last().copied();
        filled
    }

    /// Completion is derived, never stored.
    pub fn is_complete(&self) -> bool {
        self.regions.iter().all(|r| r.filled)
    }

    /// Filled fraction in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.regions.is_empty() {
            return 1.0;
        }
        let filled = self.regions.iter().filter(|r| r.filled).count();
        filled as f32 / self.regions.len() as f32
    }

    /// Return every region to unfilled and clear the session state, as a
    /// document reload would.
    pub fn reset_fills(&mut self) {
        for region in &mut self.regions {
            region.filled = false;
            region.current_color = Color::WHITE;
        }
        self.selected_color = None;
        self.focused_region = None;
    }

    /// Per-frame render snapshot for the external painter: one value per
    /// region with its current color, highlight/focus membership, the
    /// geometry as path data, and the label placed at the current zoom
    /// (absent for filled regions and sub-unit slivers).
    pub fn render_regions(&self, zoom_scale: f32) -> Vec<serde_json::Value> {
        #[derive(Serialize)]
        struct LabelSer {
            font_size: f32,
            x: f32,
            y: f32,
            contained: bool,
        }
        #[derive(Serialize)]
        struct RegionSer {
            id: u32,
            color_id: u32,
            filled: bool,
            color: [u8; 4],
            highlighted: bool,
            focused: bool,
            path: String,
            label: Option<LabelSer>,
        }

        self.regions
            .iter()
            .map(|r| {
                let highlighted =
                    self.selected_color == Some(r.color_id) && !r.filled;
                let label = if r.filled {
                    None
                } else {
                    labeling::place_label(r, zoom_scale, &r.color_id.to_string()).map(|p| {
                        LabelSer {
                            font_size: p.font_size,
                            x: p.anchor.x,
                            y: p.anchor.y,
                            contained: p.contained,
                        }
                    })
                };
                serde_json::to_value(RegionSer {
                    id: r.id,
                    color_id: r.color_id,
                    filled: r.filled,
                    color: r.current_color.to_rgba(),
                    highlighted,
                    focused: self.focused_region == Some(r.id),
                    path: path::to_path_data(&r.path),
                    label,
                })
                .unwrap_or(serde_json::Value::Null)
            })
            .collect()
    }
}
