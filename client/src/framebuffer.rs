use common::PixelSize;

use crate::{PixelRect, Rgb, Surface};

/// In-memory pixel surface. `None` is the background.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb>>,
}

impl FrameBuffer {
    pub fn new(size: PixelSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            pixels: vec![None; size.width as usize * size.height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.index(x, y)]
    }

    /// Number of pixels that are not background.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|pixel| pixel.is_some()).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Pixels whose centres fall inside `[start, start + len)`, unclipped.
fn covered_span(start: f64, len: f64) -> (i64, i64) {
    let first = (start - 0.5).ceil() as i64;
    let end = (start + len - 0.5).ceil() as i64;
    (first, end)
}

impl Surface for FrameBuffer {
    fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn fill_rect(&mut self, rect: PixelRect, fill: Rgb, outline: Rgb) {
        let (x0, x1) = covered_span(rect.x, rect.width);
        let (y0, y1) = covered_span(rect.y, rect.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let clip_x = x0.max(0)..x1.min(self.width as i64);
        let clip_y = y0.max(0)..y1.min(self.height as i64);

        for py in clip_y {
            for px in clip_x.clone() {
                let on_edge = px == x0 || px == x1 - 1 || py == y0 || py == y1 - 1;
                let index = self.index(px as u32, py as u32);
                self.pixels[index] = Some(if on_edge { outline } else { fill });
            }
        }
    }
}
