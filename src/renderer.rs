use crate::canvas::{Canvas, Rgb};
use crate::scene::{Frame, Scene};

const BACKGROUND: Rgb = Rgb::BURGUNDY;
// Same as the background, so walls only show through the light they block.
const WALL: Rgb = Rgb::BURGUNDY;
const STUB: Rgb = Rgb::WHITE;
const MARKER: Rgb = Rgb::WHITE;

/// Issue the draw calls for one frame: background, walls, light marker,
/// direction stubs, then the lit ray segments on top.
pub fn render_frame<C: Canvas>(canvas: &mut C, scene: &Scene, frame: &Frame) {
    canvas.set_background(BACKGROUND);

    for wall in scene.walls() {
        canvas.draw_line(wall.a(), wall.b(), WALL);
    }

    canvas.draw_ellipse(frame.light_pos, scene.config().marker_diameter, MARKER);
    for &(from, to) in &frame.stubs {
        canvas.draw_line(from, to, STUB);
    }

    for seg in &frame.segments {
        canvas.draw_line(seg.from, seg.to, seg.color);
    }
}
