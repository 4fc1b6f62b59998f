//! Minimal immediate-mode UI
//!
//! Just enough for this app: hit-testable rectangles, a per-frame mouse
//! snapshot, pill buttons, and text helpers.

mod widgets;

pub use widgets::{
    draw_heart, draw_rounded_rect, draw_rounded_rect_lines, draw_text_centered,
    draw_wrapped_text_centered, pill_button, PillStyle,
};

use macroquad::prelude::{is_mouse_button_pressed, mouse_position, vec2, MouseButton, Vec2};

/// Screen-space rectangle
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w` x `h` centered on a point
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Mouse state sampled once per frame
#[derive(Debug, Clone, Copy)]
pub struct Mouse {
    pub pos: Vec2,
    pub pressed: bool,
}

impl Mouse {
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            pos: vec2(x, y),
            pressed: is_mouse_button_pressed(MouseButton::Left),
        }
    }

    pub fn hovering(&self, rect: &Rect) -> bool {
        rect.contains(self.pos)
    }

    pub fn clicked(&self, rect: &Rect) -> bool {
        self.pressed && rect.contains(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(vec2(10.0, 10.0)));
        assert!(rect.contains(vec2(60.0, 35.0)));
        assert!(!rect.contains(vec2(9.9, 35.0)));
        assert!(!rect.contains(vec2(60.0, 60.1)));
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(vec2(50.0, 50.0), 20.0, 10.0);
        assert_eq!(rect.x, 40.0);
        assert_eq!(rect.y, 45.0);
        assert_eq!(rect.center(), vec2(50.0, 50.0));
    }
}
