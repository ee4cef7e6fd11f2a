use crate::canvas::Rgb;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::light::{LightSource, RayHit};
use crate::math::Point;
use crate::world::{BoundarySegment, create_star_boundaries, enclosing_rectangle};

/// One visible ray: light position to its nearest hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSegment {
    pub ray_index: usize,
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
}

/// Draw instructions produced by one [`Scene::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub light_pos: Point,
    pub segments: Vec<DrawSegment>,
    /// Short direction marks around the light, one per ray. Empty when disabled.
    pub stubs: Vec<(Point, Point)>,
    /// Rays that found no wall this frame.
    pub misses: usize,
}

/// Walls plus the light. Walls are fixed after construction.
pub struct Scene {
    config: SceneConfig,
    walls: Vec<BoundarySegment>,
    light: LightSource,
    frame_count: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;

        let mut walls = Vec::new();
        for star in &config.stars {
            create_star_boundaries(
                &mut walls,
                star.center,
                star.outer_radius,
                star.inner_radius,
                star.points,
            );
        }
        walls.extend(enclosing_rectangle(
            config.width as f32,
            config.height as f32,
        ));

        let start = config.light_start.unwrap_or_else(|| config.center());
        let light = LightSource::new(start, config.ray_step_degrees)?;

        log::info!(
            "Scene ready: {}x{} canvas, {} stars, {} walls, {} rays",
            config.width,
            config.height,
            config.stars.len(),
            walls.len(),
            light.ray_count()
        );

        Ok(Self {
            config,
            walls,
            light,
            frame_count: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn walls(&self) -> &[BoundarySegment] {
        &self.walls
    }

    pub fn light(&self) -> &LightSource {
        &self.light
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Nearest hit per ray for the light's current position. Reads only.
    pub fn cast(&self) -> Vec<Option<RayHit>> {
        if self.config.parallel_cast {
            self.light.par_cast_all(&self.walls)
        } else {
            self.light.cast_all(&self.walls)
        }
    }

    /// Per-frame step: move the light to `pointer`, cast every ray, and return
    /// what to draw.
    pub fn advance(&mut self, pointer: Point) -> Frame {
        self.light.update(pointer);

        let origin = self.light.pos();
        let hits = self.cast();
        let mut misses = 0;
        let mut segments = Vec::with_capacity(hits.len());
        for (i, hit) in hits.iter().enumerate() {
            match hit {
                Some(hit) => segments.push(DrawSegment {
                    ray_index: i,
                    from: origin,
                    to: hit.point,
                    // Colors count frames from 1.
                    color: ray_color(self.frame_count + 1, i),
                }),
                None => misses += 1,
            }
        }
        if misses > 0 {
            log::trace!("Frame {}: {misses} rays hit nothing", self.frame_count);
        }

        let stubs = if self.config.show_direction_stubs {
            let len = self.config.stub_length;
            self.light
                .rays()
                .map(|ray| (origin, origin + ray.dir() * len))
                .collect()
        } else {
            Vec::new()
        };

        let frame = Frame {
            index: self.frame_count,
            light_pos: origin,
            segments,
            stubs,
            misses,
        };
        self.frame_count += 1;
        frame
    }
}

/// Gray level that spins with the frame count and fans out by ray index.
#[inline]
pub fn ray_color(frame: u64, ray_index: usize) -> Rgb {
    let gray = (frame.wrapping_mul(5).wrapping_add(ray_index as u64 * 10) % 255) as u8;
    Rgb::new(gray, 150, 150)
}
