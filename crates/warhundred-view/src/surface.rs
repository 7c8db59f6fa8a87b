//! Drawing surfaces.

use crate::{Color, Rect};

/// Something a [`Scene`](crate::Scene) can be painted onto.
///
/// # Trait bounds
///
/// - `Send + 'static` → a canvas owns its surface and may run on a Tokio
///   task, see [`spawn_canvas`](crate::spawn_canvas).
pub trait Surface: Send + 'static {
    /// Changes the drawable area. Contents are undefined afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect`, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Frees everything the surface holds. Called once, when the canvas
    /// that owns it goes away.
    fn release(&mut self);
}

/// An in-memory RGB surface.
///
/// Useful headless and in tests: after painting, individual pixels can be
/// read back with [`pixel`](Self::pixel).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    released: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The colour at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for FrameBuffer {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK; width as usize * height as usize];
        self.released = false;
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        // Clip in i64 so huge rects near the edges can't overflow.
        let x0 = i64::from(rect.x).clamp(0, i64::from(self.width));
        let y0 = i64::from(rect.y).clamp(0, i64::from(self.height));
        let x1 = (i64::from(rect.x) + i64::from(rect.width)).clamp(0, i64::from(self.width));
        let y1 = (i64::from(rect.y) + i64::from(rect.height)).clamp(0, i64::from(self.height));

        for y in y0..y1 {
            let row = self.index(0, y as u32);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
        self.released = true;
    }
}
