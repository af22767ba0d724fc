use crate::model::Region;

/// Topmost region containing the point. Later-drawn shapes sit above
/// earlier ones, so the scan runs in reverse traversal order and the
/// first hit wins.
pub fn hit_region(regions: &[Region], x: f32, y: f32) -> Option<u32> {
    regions
        .iter()
        .rev()
        .find(|r| r.contains(x, y))
        .map(|r| r.id)
}
