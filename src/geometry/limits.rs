// Centralized ingestion limits to harden against untrusted documents

// Path data caps
pub const MAX_PATH_DATA_LEN: usize = 1024 * 1024; // characters in one `d` string
pub const MAX_PATH_COMMANDS: usize = 100_000;
pub const MAX_SUBPATHS: usize = 10_000;
pub const MAX_SEGMENTS: usize = 200_000; // expanded segments per path

// Polygon/polyline caps
pub const MAX_POLY_POINTS: usize = 100_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && x >= COORD_MIN && x <= COORD_MAX
}
