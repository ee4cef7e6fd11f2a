use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::error::{Result, StarCasterError};
use crate::math::Point;
use crate::ray::Ray;
use crate::world::BoundarySegment;

/// Upper bound on the fan size. Keeps a tiny step from asking for an absurd allocation.
pub const MAX_RAYS: usize = 1_000_000;

/// Number of rays for a fan spaced `step_degrees` apart: `ceil(360 / step)`.
pub fn ray_count_for_step(step_degrees: f32) -> Result<usize> {
    if !step_degrees.is_finite() || step_degrees <= 0.0 {
        return Err(StarCasterError::Configuration(format!(
            "ray step must be a positive number of degrees, got {step_degrees}"
        )));
    }

    // Count in f64 so steps like 0.1 don't pick up an extra ray from rounding.
    let count = (360.0 / step_degrees as f64 - 1e-9).ceil().max(1.0);
    if count > MAX_RAYS as f64 {
        return Err(StarCasterError::Configuration(format!(
            "ray step of {step_degrees} degrees needs {count} rays, limit is {MAX_RAYS}"
        )));
    }
    Ok(count as usize)
}

/// Nearest wall crossing found by one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Point,
    pub distance: f32,
}

/// Movable point light with a fixed fan of rays.
///
/// Every ray shares the light's position as its origin; only the directions are
/// stored. The fan is built once and never changes size or angles.
pub struct LightSource {
    pos: Point,
    angles: Vec<f32>, // radians
    dirs: Vec<Point>,
}

impl LightSource {
    /// Fan with one ray every `step_degrees`, starting at 0 and stopping before
    /// a full turn (360 rays for a 1 degree step).
    pub fn new(pos: Point, step_degrees: f32) -> Result<Self> {
        let count = ray_count_for_step(step_degrees)?;
        let angles: Vec<f32> = (0..count)
            .map(|i| (i as f32 * step_degrees).to_radians())
            .collect();
        let dirs = angles.iter().map(|&a| Point::from_angle(a)).collect();

        log::debug!("Light source created with {count} rays ({step_degrees} deg step)");

        Ok(Self { pos, angles, dirs })
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.dirs.len()
    }

    /// Ray angle offsets in radians, in fan order.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// The fan anchored at the current position.
    pub fn rays(&self) -> impl Iterator<Item = Ray> + '_ {
        let origin = self.pos;
        self.dirs.iter().map(move |&dir| Ray::from_unit_dir(origin, dir))
    }

    pub fn update(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Nearest hit for every ray, in fan order. `None` where a ray hits nothing.
    pub fn cast_all(&self, walls: &[BoundarySegment]) -> Vec<Option<RayHit>> {
        self.rays().map(|ray| nearest_hit(&ray, walls)).collect()
    }

    /// Same result as [`cast_all`](Self::cast_all), with rays spread over the rayon pool.
    pub fn par_cast_all(&self, walls: &[BoundarySegment]) -> Vec<Option<RayHit>> {
        let origin = self.pos;
        self.dirs
            .par_iter()
            .map(|&dir| nearest_hit(&Ray::from_unit_dir(origin, dir), walls))
            .collect()
    }
}

/// Closest crossing of `ray` over `walls`. On an exact distance tie the wall
/// that comes first in `walls` wins.
pub fn nearest_hit(ray: &Ray, walls: &[BoundarySegment]) -> Option<RayHit> {
    let origin = ray.origin();
    let mut closest: Option<RayHit> = None;
    let mut record = f32::INFINITY;

    for wall in walls {
        if let Some(point) = ray.intersect(wall) {
            let distance = origin.distance(point);
            if distance < record {
                record = distance;
                closest = Some(RayHit { point, distance });
            }
        }
    }
    closest
}
