//! Scenes: what each view draws, as plain data.
//!
//! A [`Scene`] is a background colour plus a list of [`DrawCommand`]s.
//! Building the scene is separate from painting it, so the same scene can
//! go to a [`FrameBuffer`](crate::FrameBuffer) in tests or to a real
//! graphics backend.

use crate::{Surface, ViewState};

/// A 24-bit RGB colour, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const SKY_BLUE: Color = Color(0x87ceeb);
    pub const GREEN: Color = Color(0x00ff00);
    pub const YELLOW: Color = Color(0xffff00);

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// An axis-aligned rectangle in surface pixels. May extend past the
/// surface; painting clips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
}

/// One complete frame for a view at a given size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn for_view(view: ViewState, width: u32, height: u32) -> Self {
        let (background, commands) = match view {
            // Sky with a single building.
            ViewState::Town => (
                Color::SKY_BLUE,
                vec![DrawCommand::FillRect {
                    rect: Rect::new(100, 100, 200, 200),
                    color: Color::GREEN,
                }],
            ),
            ViewState::Battle => (
                Color::BLACK,
                vec![DrawCommand::FillRect {
                    rect: Rect::new(50, 150, 200, 300),
                    color: Color::YELLOW,
                }],
            ),
        };
        Self {
            width,
            height,
            background,
            commands,
        }
    }

    /// Sizes the surface, clears it, then replays every command.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.resize(self.width, self.height);
        surface.clear(self.background);
        for command in &self.commands {
            match *command {
                DrawCommand::FillRect { rect, color } => surface.fill_rect(rect, color),
            }
        }
    }
}
