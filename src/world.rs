use std::f32::consts::PI;

use crate::math::Point;

/// Immutable wall segment. Rays stop at the nearest one they cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySegment {
    a: Point,
    b: Point,
}

impl BoundarySegment {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub const fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }
}

/// Appends the closed outline of a star to `walls`.
///
/// Vertices alternate between `outer_radius` (even index) and `inner_radius`
/// (odd index), spaced `PI / points` apart starting at angle 0. The last vertex
/// connects back to the first, so exactly `2 * points` segments are appended.
/// Radii are not checked; zero or negative values give degenerate segments.
pub fn create_star_boundaries(
    walls: &mut Vec<BoundarySegment>,
    center: Point,
    outer_radius: f32,
    inner_radius: f32,
    points: u32,
) {
    let vertex_count = points as usize * 2;
    if vertex_count == 0 {
        return;
    }

    let angle_step = PI / points as f32;
    let vertices: Vec<Point> = (0..vertex_count)
        .map(|i| {
            let angle = i as f32 * angle_step;
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            center + Point::from_angle(angle) * r
        })
        .collect();

    walls.reserve(vertex_count);
    for i in 0..vertex_count {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertex_count];
        walls.push(BoundarySegment::new(a, b));
    }
}

/// Four walls just outside a `width` x `height` canvas, in top, right, bottom,
/// left order. Keeps every ray from escaping near the edges.
pub fn enclosing_rectangle(width: f32, height: f32) -> [BoundarySegment; 4] {
    [
        BoundarySegment::from_coords(-2.0, -2.0, width, -2.0),
        BoundarySegment::from_coords(width, -1.0, width, height),
        BoundarySegment::from_coords(width, height, -1.0, height),
        BoundarySegment::from_coords(-1.0, height, -1.0, -1.0),
    ]
}
