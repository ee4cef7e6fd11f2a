use crate::math::Point;
use crate::world::BoundarySegment;

/// Half-line from `origin` along a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point,
    dir: Point,
}

impl Ray {
    /// `dir` is normalized. A zero `dir` gives a ray that never hits anything.
    #[inline]
    pub fn new(origin: Point, dir: Point) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    #[inline]
    pub fn from_angle(origin: Point, angle: f32) -> Self {
        Self {
            origin,
            dir: Point::from_angle(angle),
        }
    }

    /// Caller guarantees `dir` is already unit length.
    #[inline]
    pub(crate) fn from_unit_dir(origin: Point, dir: Point) -> Self {
        Self { origin, dir }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn dir(&self) -> Point {
        self.dir
    }

    /// Aim the ray at `target`. Aiming at the origin itself keeps the old direction.
    pub fn reorient(&mut self, target: Point) {
        let delta = target - self.origin;
        if delta.length() > 0.0 {
            self.dir = delta.normalize();
        }
    }

    /// Where this ray crosses `wall`, if it does.
    ///
    /// Line-line intersection with the wall parameterised by `t` and the ray by `u`.
    /// The hit must lie strictly inside the wall (`0 < t < 1`, endpoints excluded)
    /// and strictly in front of the origin (`u > 0`). Parallel, coincident and
    /// zero-length walls give `None`.
    pub fn intersect(&self, wall: &BoundarySegment) -> Option<Point> {
        let (x1, y1) = (wall.a().x, wall.a().y);
        let (x2, y2) = (wall.b().x, wall.b().y);

        let (x3, y3) = (self.origin.x, self.origin.y);
        let x4 = self.origin.x + self.dir.x;
        let y4 = self.origin.y + self.dir.y;

        let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if den == 0.0 {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
        let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / den;
        if t > 0.0 && t < 1.0 && u > 0.0 {
            Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
        } else {
            None
        }
    }
}
