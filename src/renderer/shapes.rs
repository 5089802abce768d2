//! Composite shapes for the bird, pipes and backdrop

use super::surface::{Color, Surface};

pub const SKY_TOP: Color = Color::hex(0x87CEEB);
pub const SKY_BOTTOM: Color = Color::hex(0x1E90FF);
pub const GROUND: Color = Color::hex(0x8B4513);
pub const PIPE: Color = Color::hex(0x228B22);
pub const PIPE_RIM: Color = Color::hex(0x006400);
pub const BIRD_BODY: Color = Color::hex(0xFFD700);
pub const BIRD_BEAK: Color = Color::hex(0xFF6347);
pub const BIRD_EYE: Color = Color::BLACK;
pub const SCORE_TEXT: Color = Color::BLACK;

/// Rim overhang on each side of a pipe
const RIM_OVERHANG: f32 = 3.0;
const RIM_HEIGHT: f32 = 10.0;

/// Full-canvas sky gradient
pub fn background(surface: &mut impl Surface) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_vertical_gradient(0.0, 0.0, w, h, SKY_TOP, SKY_BOTTOM);
}

/// Ground strip along the bottom edge
pub fn ground(surface: &mut impl Surface, ground_height: f32) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0.0, h - ground_height, w, ground_height, GROUND);
}

/// A pipe body plus its rim. The rim sits on the end facing the gap.
pub fn pipe(surface: &mut impl Surface, x: f32, y: f32, width: f32, height: f32, is_top: bool) {
    surface.fill_rect(x, y, width, height, PIPE);
    let rim_y = if is_top { y + height - RIM_HEIGHT } else { y };
    surface.fill_rect(
        x - RIM_OVERHANG,
        rim_y,
        width + 2.0 * RIM_OVERHANG,
        RIM_HEIGHT,
        PIPE_RIM,
    );
}

/// Round bird with beak and eye inside its `size x size` box at (x, y)
pub fn bird(surface: &mut impl Surface, x: f32, y: f32, size: f32) {
    let r = size / 2.0;
    surface.fill_circle(x + r, y + r, r, BIRD_BODY);
    // Proportions taken from a 30px bird
    let s = size / 30.0;
    surface.fill_rect(x + 25.0 * s, y + 12.0 * s, 10.0 * s, 5.0 * s, BIRD_BEAK);
    surface.fill_circle(x + 20.0 * s, y + 10.0 * s, 3.0 * s, BIRD_EYE);
}

/// Score readout in the top-left corner
pub fn score(surface: &mut impl Surface, score: u32) {
    surface.fill_text(&format!("Score: {score}"), 20.0, 30.0, SCORE_TEXT);
}
