use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use star_caster::scaler::Stretch;
use star_caster::{FrameBuffer, Point, Scene, SceneConfig, StarCasterError, render_frame};

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    scene: Scene,

    // Canvas-resolution buffer, stretched to the window every frame
    canvas: FrameBuffer,
    stretch: Option<Stretch>,

    pointer: Point,

    // Stats
    frame_counter: u32,
    missed_rays: usize,
    last_stats: Instant,
}

impl App {
    fn new(scene: Scene) -> Self {
        let config = scene.config();
        let canvas = FrameBuffer::new(config.width as usize, config.height as usize);
        let pointer = scene.light().pos();
        Self {
            window: None,
            surface: None,
            scene,
            canvas,
            stretch: None,
            pointer,
            frame_counter: 0,
            missed_rays: 0,
            last_stats: Instant::now(),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> star_caster::Result<()> {
        let config = self.scene.config();
        let attributes = Window::default_attributes()
            .with_title("Star Caster")
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| StarCasterError::Window(e.to_string()))?,
        );
        window.set_cursor_visible(false);

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| StarCasterError::Surface(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| StarCasterError::Surface(e.to_string()))?;

        let size = window.inner_size();
        self.rebuild_stretch(size.width as usize, size.height as usize);
        log::info!("Window created at {}x{}", size.width, size.height);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_stretch(&mut self, dw: usize, dh: usize) {
        self.stretch = Some(Stretch::new(
            dw,
            dh,
            self.canvas.width(),
            self.canvas.height(),
        ));
    }

    fn redraw(&mut self, id: WindowId) -> star_caster::Result<()> {
        let (window, surface, stretch) = match (&self.window, &mut self.surface, &self.stretch) {
            (Some(w), Some(s), Some(st)) if w.id() == id => (w, s, st),
            _ => return Ok(()),
        };

        let frame = self.scene.advance(self.pointer);
        self.missed_rays += frame.misses;
        render_frame(&mut self.canvas, &self.scene, &frame);

        let (dw, dh) = stretch.dst_size();
        // Minimized window, skip presenting
        let (Some(w), Some(h)) = (NonZeroU32::new(dw as u32), NonZeroU32::new(dh as u32)) else {
            return Ok(());
        };
        surface
            .resize(w, h)
            .map_err(|e| StarCasterError::Surface(e.to_string()))?;

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| StarCasterError::Surface(e.to_string()))?;
        stretch.blit(&mut buf, self.canvas.pixels());
        buf.present()
            .map_err(|e| StarCasterError::Surface(e.to_string()))?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_stats).as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!(
                "FPS: {:.1}, rays without a hit: {}",
                self.frame_counter as f32 / elapsed,
                self.missed_rays
            );
            self.frame_counter = 0;
            self.missed_rays = 0;
            self.last_stats = now;
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("Failed to set up window: {e}");
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(stretch) = &self.stretch {
                    self.pointer = stretch.to_source(position.x, position.y);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    log::error!("Frame failed: {e}");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_stretch(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "star_caster")]
#[command(about = "Point light casting rays against star-shaped walls", long_about = None)]
struct Args {
    /// TOML scene file (defaults to the built-in four-star scene)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cast rays on the rayon thread pool
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let config = match &self.config {
            Some(path) => SceneConfig::from_path(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SceneConfig::default(),
        };
        Ok(if self.parallel {
            config.parallel_cast(true)
        } else {
            config
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Args::parse().scene_config()?;
    let scene = Scene::new(config)?;

    let event_loop = EventLoop::new()?;
    // Redraws are requested continuously from about_to_wait, so Wait still animates.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(scene);
    event_loop.run_app(&mut app)?;
    Ok(())
}
