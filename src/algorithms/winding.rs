//! Winding number calculation for point-in-region testing.
//!
//! Uses horizontal ray casting with signed crossing count. A region's
//! interior is everything with non-zero total winding across all of its
//! flattened sub-contours, so holes authored with opposite orientation
//! behave as holes.

use crate::model::Vec2;

/// Compute the winding number of a point relative to a closed polygon.
///
/// Returns the number of times the polygon winds around the point.
/// - Positive = counter-clockwise winding
/// - Negative = clockwise winding
/// - Zero = point is outside
pub fn winding_number(px: f32, py: f32, polygon: &[Vec2]) -> i32 {
    if polygon.len() < 3 {
        return 0;
    }

    let mut winding = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        // Check if the edge crosses the horizontal ray from (px, py) going right
        if p1.y <= py {
            if p2.y > py {
                // Upward crossing
                let cross = cross_product(p1.x - px, p1.y - py, p2.x - px, p2.y - py);
                if cross > 0.0 {
                    winding += 1;
                }
            }
        } else if p2.y <= py {
            // Downward crossing
            let cross = cross_product(p1.x - px, p1.y - py, p2.x - px, p2.y - py);
            if cross < 0.0 {
                winding -= 1;
            }
        }
    }

    winding
}

/// Point-in-shape under the non-zero rule, summed over every ring.
#[inline]
pub fn point_in_rings(px: f32, py: f32, rings: &[Vec<Vec2>]) -> bool {
    let mut total = 0i32;
    for ring in rings {
        total += winding_number(px, py, ring);
    }
    total != 0
}

/// Cross product of 2D vectors (ax, ay) and (bx, by).
#[inline]
fn cross_product(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * by - ay * bx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec2(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    #[test]
    fn winding_number_square() {
        // Counter-clockwise square
        let square = vec![
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ];

        assert_eq!(winding_number(5.0, 5.0, &square), 1);

        assert_eq!(winding_number(-5.0, 5.0, &square), 0);
        assert_eq!(winding_number(15.0, 5.0, &square), 0);
        assert_eq!(winding_number(5.0, -5.0, &square), 0);
        assert_eq!(winding_number(5.0, 15.0, &square), 0);
    }

    #[test]
    fn winding_number_clockwise() {
        // Clockwise square (negative winding)
        let square = vec![
            vec2(0.0, 0.0),
            vec2(0.0, 10.0),
            vec2(10.0, 10.0),
            vec2(10.0, 0.0),
        ];

        assert_eq!(winding_number(5.0, 5.0, &square), -1);
    }

    #[test]
    fn concave_polygon() {
        // L-shaped polygon
        let l_shape = vec![
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 5.0),
            vec2(5.0, 5.0),
            vec2(5.0, 10.0),
            vec2(0.0, 10.0),
        ];

        assert_eq!(winding_number(2.0, 2.0, &l_shape), 1);
        assert_eq!(winding_number(2.0, 7.0, &l_shape), 1);

        // Outside the L (in the concave notch)
        assert_eq!(winding_number(7.0, 7.0, &l_shape), 0);
    }

    #[test]
    fn rings_with_opposite_hole() {
        let outer = vec![
            vec2(0.0, 0.0),
            vec2(20.0, 0.0),
            vec2(20.0, 20.0),
            vec2(0.0, 20.0),
        ];
        // Hole wound the opposite way
        let hole = vec![
            vec2(5.0, 5.0),
            vec2(5.0, 15.0),
            vec2(15.0, 15.0),
            vec2(15.0, 5.0),
        ];
        let rings = vec![outer, hole];

        assert!(point_in_rings(2.0, 2.0, &rings));
        assert!(!point_in_rings(10.0, 10.0, &rings), "hole interior is outside");
        assert!(!point_in_rings(25.0, 10.0, &rings));
    }

    #[test]
    fn empty_and_degenerate() {
        assert_eq!(winding_number(0.0, 0.0, &[]), 0);
        assert_eq!(winding_number(0.0, 0.0, &[vec2(0.0, 0.0)]), 0);
        assert_eq!(
            winding_number(0.0, 0.0, &[vec2(0.0, 0.0), vec2(1.0, 1.0)]),
            0
        );
        assert!(!point_in_rings(0.0, 0.0, &[]));
    }
}
