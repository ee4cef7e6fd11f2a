//! Point light casting a fan of rays against star-shaped walls.
//!
//! [`Scene`] is the entry point: build it once from a [`SceneConfig`], then call
//! [`Scene::advance`] every frame with the pointer position and hand the
//! returned [`Frame`] to [`render_frame`].

pub mod canvas;
pub mod config;
pub mod error;
pub mod light;
pub mod math;
pub mod ray;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod world;

pub use canvas::{Canvas, FrameBuffer, Rgb};
pub use config::{SceneConfig, StarConfig};
pub use error::{Result, StarCasterError};
pub use light::{LightSource, RayHit};
pub use math::Point;
pub use ray::Ray;
pub use renderer::render_frame;
pub use scene::{DrawSegment, Frame, Scene};
pub use world::{BoundarySegment, create_star_boundaries, enclosing_rectangle};
