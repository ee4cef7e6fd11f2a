//! Drawing surface the scene renders into.

use serde::{Deserialize, Serialize};

use crate::math::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BURGUNDY: Rgb = Rgb::new(128, 0, 32);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// BGRA8 in little-endian memory, alpha left at 0.
    #[inline]
    pub const fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// The three primitives a frame needs.
pub trait Canvas {
    fn set_background(&mut self, color: Rgb);
    fn draw_line(&mut self, p1: Point, p2: Point, color: Rgb);
    /// Filled circle.
    fn draw_ellipse(&mut self, center: Point, diameter: f32, color: Rgb);
}

/// CPU canvas over packed `u32` pixels, row major.
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }
}

impl Canvas for FrameBuffer {
    fn set_background(&mut self, color: Rgb) {
        self.pixels.fill(color.pack());
    }

    fn draw_line(&mut self, p1: Point, p2: Point, color: Rgb) {
        // Clip first so far-off endpoints don't walk millions of pixels.
        let Some((a, b)) = clip_line(p1, p2, self.width as f32, self.height as f32) else {
            return;
        };
        let color = color.pack();

        // Bresenham
        let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_ellipse(&mut self, center: Point, diameter: f32, color: Rgb) {
        let r = diameter * 0.5;
        if !(r > 0.0) {
            return;
        }
        let color = color.pack();
        let r2 = r * r;

        let x0 = (center.x - r).floor().max(0.0) as i32;
        let x1 = (center.x + r).ceil().min(self.width as f32 - 1.0) as i32;
        let y0 = (center.y - r).floor().max(0.0) as i32;
        let y1 = (center.y + r).ceil().min(self.height as f32 - 1.0) as i32;

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }
}

/// Liang-Barsky clip of `p1 -> p2` to `[0, w] x [0, h]`.
fn clip_line(p1: Point, p2: Point, w: f32, h: f32) -> Option<(Point, Point)> {
    let d = p2 - p1;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-d.x, p1.x),
        (d.x, w - p1.x),
        (-d.y, p1.y),
        (d.y, h - p1.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if !(t0 <= t1) {
        return None;
    }
    Some((p1 + d * t0, p1 + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0x0012_3456);
        assert_eq!(Rgb::BURGUNDY.pack(), 0x0080_0020);
    }

    #[test]
    fn test_background_fills_everything() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_background(Rgb::BURGUNDY);
        assert!(fb.pixels().iter().all(|&p| p == Rgb::BURGUNDY.pack()));
    }

    #[test]
    fn test_horizontal_line() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Point::new(1.0, 5.0), Point::new(8.0, 5.0), Rgb::WHITE);
        for x in 1..=8 {
            assert_eq!(fb.get(x, 5), Some(Rgb::WHITE.pack()));
        }
        assert_eq!(fb.get(0, 5), Some(0));
        assert_eq!(fb.get(9, 5), Some(0));
        assert_eq!(fb.get(4, 4), Some(0));
    }

    #[test]
    fn test_diagonal_line_hits_both_ends() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Point::new(0.0, 0.0), Point::new(9.0, 9.0), Rgb::WHITE);
        for i in 0..10 {
            assert_eq!(fb.get(i, i), Some(Rgb::WHITE.pack()));
        }
    }

    #[test]
    fn test_offscreen_lines_do_not_panic() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Point::new(-5000.0, -5000.0), Point::new(5000.0, 5000.0), Rgb::WHITE);
        fb.draw_line(Point::new(-50.0, 3.0), Point::new(-10.0, 3.0), Rgb::WHITE);
        fb.draw_line(Point::new(20.0, 20.0), Point::new(20.0, 20.0), Rgb::WHITE);
        assert_eq!(fb.get(5, 5), Some(Rgb::WHITE.pack()));
        assert_eq!(fb.get(3, 4), Some(0));
    }

    #[test]
    fn test_filled_circle() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.draw_ellipse(Point::new(10.0, 10.0), 8.0, Rgb::WHITE);
        assert_eq!(fb.get(10, 10), Some(Rgb::WHITE.pack()));
        assert_eq!(fb.get(7, 10), Some(Rgb::WHITE.pack()));
        assert_eq!(fb.get(10, 15), Some(0));
        assert_eq!(fb.get(6, 6), Some(0));
    }

    #[test]
    fn test_circle_near_edge_is_clipped() {
        let mut fb = FrameBuffer::new(5, 5);
        fb.draw_ellipse(Point::new(0.0, 0.0), 6.0, Rgb::WHITE);
        fb.draw_ellipse(Point::new(-100.0, 2.0), 6.0, Rgb::WHITE);
        fb.draw_ellipse(Point::new(2.0, 2.0), 0.0, Rgb::WHITE);
        assert_eq!(fb.get(0, 0), Some(Rgb::WHITE.pack()));
        assert_eq!(fb.get(4, 4), Some(0));
    }

    #[test]
    fn test_clip_line() {
        let (a, b) = clip_line(Point::new(-10.0, 5.0), Point::new(20.0, 5.0), 10.0, 10.0).unwrap();
        assert_eq!(a, Point::new(0.0, 5.0));
        assert_eq!(b, Point::new(10.0, 5.0));
        assert!(clip_line(Point::new(-10.0, -1.0), Point::new(20.0, -1.0), 10.0, 10.0).is_none());
    }
}
