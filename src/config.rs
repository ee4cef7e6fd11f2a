//! Scene configuration, fixed once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarCasterError};
use crate::light::ray_count_for_step;
use crate::math::Point;

/// One star outline. Radii and point count are taken as given; odd values only
/// give odd-looking geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    pub center: Point,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub points: u32,
}

impl StarConfig {
    pub fn new(center: Point, outer_radius: f32, inner_radius: f32, points: u32) -> Self {
        Self {
            center,
            outer_radius,
            inner_radius,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    /// Degrees between neighbouring rays.
    pub ray_step_degrees: f32,
    pub stars: Vec<StarConfig>,
    /// Cast rays on the rayon pool instead of the calling thread.
    pub parallel_cast: bool,
    /// Where the light sits before the first pointer sample. Canvas center if unset.
    pub light_start: Option<Point>,
    pub marker_diameter: f32,
    pub show_direction_stubs: bool,
    pub stub_length: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let (w, h) = (1000.0, 1000.0);
        Self {
            width: 1000,
            height: 1000,
            ray_step_degrees: 1.0,
            stars: vec![
                StarConfig::new(Point::new(w / 2.0, h / 2.0), 300.0, 120.0, 5),
                StarConfig::new(Point::new(w / 4.0, h / 4.0), 150.0 * 0.3, 60.0 * 0.3, 5),
                StarConfig::new(Point::new(w / 6.0, h * 0.75), 150.0 * 0.8, 60.0 * 0.8, 5),
                StarConfig::new(Point::new(w * 0.75, h * 0.75), 180.0, 72.0, 5),
            ],
            parallel_cast: false,
            light_start: None,
            marker_diameter: 8.0,
            show_direction_stubs: true,
            stub_length: 10.0,
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loading scene config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Rejects only what would stall or break the frame loop. Star geometry is not checked.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StarCasterError::Configuration(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        ray_count_for_step(self.ray_step_degrees)?;
        Ok(())
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn ray_step_degrees(mut self, step: f32) -> Self {
        self.ray_step_degrees = step;
        self
    }

    pub fn stars(mut self, stars: Vec<StarConfig>) -> Self {
        self.stars = stars;
        self
    }

    pub fn star(mut self, star: StarConfig) -> Self {
        self.stars.push(star);
        self
    }

    pub fn parallel_cast(mut self, enable: bool) -> Self {
        self.parallel_cast = enable;
        self
    }

    pub fn light_start(mut self, pos: Point) -> Self {
        self.light_start = Some(pos);
        self
    }

    pub fn show_direction_stubs(mut self, enable: bool) -> Self {
        self.show_direction_stubs = enable;
        self
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}
