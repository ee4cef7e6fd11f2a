use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::math::Point;

/// Maps the fixed-size canvas onto a window of any size and back.
///
/// Holds, per destination column and row, the two source neighbours and a
/// fixed-point 8.8 weight for bilinear filtering.
pub struct Stretch {
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

fn build_axis(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let scale = src as f32 / dst.max(1) as f32;
    let last = src.saturating_sub(1) as isize;
    let mut lo = Vec::with_capacity(dst);
    let mut hi = Vec::with_capacity(dst);
    let mut w = Vec::with_capacity(dst);
    for i in 0..dst {
        let f = i as f32 * scale;
        let i0 = (f.floor() as isize).clamp(0, last);
        let i1 = (i0 + 1).clamp(0, last);
        lo.push(i0 as usize);
        hi.push(i1 as usize);
        w.push(((f - i0 as f32).clamp(0.0, 1.0) * 256.0).round() as u16);
    }
    (lo, hi, w)
}

impl Stretch {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        let (x0, x1, wx) = build_axis(dst_w, src_w);
        let (y0, y1, wy) = build_axis(dst_h, src_h);
        Self {
            src_w,
            src_h,
            dst_w,
            dst_h,
            x0,
            x1,
            wx,
            y0,
            y1,
            wy,
        }
    }

    #[inline]
    pub fn dst_size(&self) -> (usize, usize) {
        (self.dst_w, self.dst_h)
    }

    /// Window pixel position to canvas coordinates.
    pub fn to_source(&self, x: f64, y: f64) -> Point {
        let sx = self.src_w as f64 / self.dst_w.max(1) as f64;
        let sy = self.src_h as f64 / self.dst_h.max(1) as f64;
        Point::new((x * sx) as f32, (y * sy) as f32)
    }

    /// Parallel bilinear stretch of `src` into `dst`.
    /// Rows are processed in parallel for cache friendly writes.
    pub fn blit(&self, dst: &mut [u32], src: &[u32]) {
        if self.dst_w == 0 || self.src_w == 0 || self.src_h == 0 {
            return;
        }
        let sw = self.src_w;
        dst.par_chunks_mut(self.dst_w)
            .take(self.dst_h)
            .enumerate()
            .for_each(|(y, dst_row)| {
                let wy = self.wy[y] as u32;
                let row0 = self.y0[y] * sw;
                let row1 = self.y1[y] * sw;

                for (x, out) in dst_row.iter_mut().enumerate() {
                    let (x0, x1) = (self.x0[x], self.x1[x]);
                    let wx = self.wx[x] as u32;

                    let top = lerp_color_u32(src[row0 + x0], src[row0 + x1], wx);
                    let bot = lerp_color_u32(src[row1 + x0], src[row1 + x1], wx);
                    *out = lerp_color_u32(top, bot, wy);
                }
            });
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]
    let inv = 256 - w256;
    // R and B together (00RR00BB), G on its own (0000GG00)
    let rb = (((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8) & 0x00FF00FF;
    let g = (((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8) & 0x0000FF00;
    rb | g
}
