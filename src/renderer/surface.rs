//! The 2D fill surface the game draws onto

use std::fmt;

/// Opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// CSS `#rrggbb` form
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Shape-fill primitives over a `width() x height()` canvas.
///
/// Drawing is fire-and-forget: implementations swallow their own failures.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Wipe the whole canvas
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// Rectangle fading from `top` to `bottom`
    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color);
    /// `y` is the text baseline
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}

/// One recorded [`Surface`] call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Circle { cx: f32, cy: f32, radius: f32, color: Color },
    Gradient { x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color },
    Text { text: String, x: f32, y: f32, color: Color },
}

/// A headless surface that records every call, for tests and the native
/// demo
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Rectangles filled with `color`
    pub fn rects_of(&self, color: Color) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls
            .iter()
            .filter(move |c| matches!(c, DrawCall::Rect { color: rc, .. } if *rc == color))
    }

    /// The text of every `fill_text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: Color, bottom: Color) {
        self.calls.push(DrawCall::Gradient {
            x,
            y,
            w,
            h,
            top,
            bottom,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
