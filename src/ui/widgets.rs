//! Drawing helpers and widgets

use macroquad::prelude::*;

use super::{Mouse, Rect};

/// Colors for a pill button's states
pub struct PillStyle {
    pub fill: Color,
    pub fill_hover: Color,
    pub border: Color,
    pub text: Color,
    pub font_size: f32,
}

/// Draw a capsule-shaped button, returns true if clicked
pub fn pill_button(mouse: &Mouse, rect: Rect, label: &str, style: &PillStyle) -> bool {
    let hovered = mouse.hovering(&rect);
    let fill = if hovered { style.fill_hover } else { style.fill };

    draw_rounded_rect(rect, rect.h / 2.0, fill);
    draw_rounded_rect_lines(rect, rect.h / 2.0, 1.5, style.border);

    let center = rect.center();
    draw_text_centered(label, center.x, center.y, style.font_size, style.text);

    mouse.clicked(&rect)
}

/// Filled rectangle with rounded corners
pub fn draw_rounded_rect(rect: Rect, radius: f32, color: Color) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    draw_rectangle(rect.x + r, rect.y, rect.w - 2.0 * r, rect.h, color);
    draw_rectangle(rect.x, rect.y + r, r, rect.h - 2.0 * r, color);
    draw_rectangle(rect.x + rect.w - r, rect.y + r, r, rect.h - 2.0 * r, color);
    for (cx, cy) in [
        (rect.x + r, rect.y + r),
        (rect.x + rect.w - r, rect.y + r),
        (rect.x + r, rect.y + rect.h - r),
        (rect.x + rect.w - r, rect.y + rect.h - r),
    ] {
        draw_circle(cx, cy, r, color);
    }
}

/// Rounded rectangle outline, corners approximated with short segments
pub fn draw_rounded_rect_lines(rect: Rect, radius: f32, thickness: f32, color: Color) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    draw_line(rect.x + r, rect.y, rect.x + rect.w - r, rect.y, thickness, color);
    draw_line(
        rect.x + r,
        rect.y + rect.h,
        rect.x + rect.w - r,
        rect.y + rect.h,
        thickness,
        color,
    );
    draw_line(rect.x, rect.y + r, rect.x, rect.y + rect.h - r, thickness, color);
    draw_line(
        rect.x + rect.w,
        rect.y + r,
        rect.x + rect.w,
        rect.y + rect.h - r,
        thickness,
        color,
    );

    let corners = [
        (rect.x + r, rect.y + r, 180.0f32),
        (rect.x + rect.w - r, rect.y + r, 270.0),
        (rect.x + rect.w - r, rect.y + rect.h - r, 0.0),
        (rect.x + r, rect.y + rect.h - r, 90.0),
    ];
    const ARC_SEGMENTS: usize = 8;
    for (cx, cy, start_deg) in corners {
        for i in 0..ARC_SEGMENTS {
            let a0 = (start_deg + 90.0 * i as f32 / ARC_SEGMENTS as f32).to_radians();
            let a1 = (start_deg + 90.0 * (i + 1) as f32 / ARC_SEGMENTS as f32).to_radians();
            draw_line(
                cx + r * a0.cos(),
                cy + r * a0.sin(),
                cx + r * a1.cos(),
                cy + r * a1.sin(),
                thickness,
                color,
            );
        }
    }
}

/// Draw text centered on a point (default font)
pub fn draw_text_centered(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, x - dims.width / 2.0, y + dims.height / 2.0, font_size, color);
}

/// Draw word-wrapped text centered within `max_width`, returns the
/// total height used
pub fn draw_wrapped_text_centered(
    text: &str,
    center_x: f32,
    top_y: f32,
    max_width: f32,
    font_size: f32,
    line_height: f32,
    color: Color,
) -> f32 {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure_text(&candidate, None, font_size as u16, 1.0).width > max_width
            && !current.is_empty()
        {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for (i, line) in lines.iter().enumerate() {
        draw_text_centered(
            line,
            center_x,
            top_y + line_height / 2.0 + i as f32 * line_height,
            font_size,
            color,
        );
    }
    lines.len() as f32 * line_height
}

/// Draw a heart from two circles and a triangle
pub fn draw_heart(x: f32, y: f32, size: f32, color: Color) {
    let r = size * 0.25;
    let cy = y - size * 0.15;
    draw_circle(x - r, cy, r, color);
    draw_circle(x + r, cy, r, color);
    draw_triangle(
        vec2(x - 2.0 * r, cy + r * 0.25),
        vec2(x + 2.0 * r, cy + r * 0.25),
        vec2(x, y + size * 0.5),
        color,
    );
}
