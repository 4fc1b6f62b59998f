//! Backdrop: breathing gradient and drifting hearts

use macroquad::prelude::*;

use super::theme;
use crate::ui::draw_heart;

/// Number of drifting background hearts
pub const BG_HEART_COUNT: usize = 28;
/// Gradient strips (enough that banding is invisible)
const GRADIENT_STRIPS: usize = 48;

/// A single drifting heart (positions normalized 0.0 to 1.0)
#[derive(Clone, Copy)]
struct BgHeart {
    x: f32,
    y: f32,
    /// Rise speed (normalized per second, negative = upward)
    vy: f32,
    /// Horizontal sway amplitude
    sway: f32,
    /// Sway cycles per second
    sway_speed: f32,
    /// Phase offset so hearts desynchronize
    phase: f32,
    /// Size in pixels
    size: f32,
    /// Alpha multiplier
    alpha: f32,
}

impl BgHeart {
    /// Create a heart with pseudo-random properties from a seed
    fn new_random(seed: u32) -> Self {
        let hash = |s: u32| -> f32 {
            let x = s.wrapping_mul(2654435761);
            x as f32 / u32::MAX as f32
        };

        Self {
            x: hash(seed),
            y: hash(seed.wrapping_add(1)),
            vy: -(hash(seed.wrapping_add(2)) * 0.02 + 0.008),
            sway: hash(seed.wrapping_add(3)) * 0.012 + 0.003,
            sway_speed: hash(seed.wrapping_add(4)) * 0.8 + 0.2,
            phase: hash(seed.wrapping_add(5)) * std::f32::consts::TAU,
            size: hash(seed.wrapping_add(6)) * 14.0 + 8.0,
            alpha: hash(seed.wrapping_add(7)) * 0.6 + 0.4,
        }
    }
}

/// The animated backdrop shared by every scene
pub struct Background {
    hearts: Vec<BgHeart>,
}

impl Background {
    pub fn new() -> Self {
        let hearts = (0..BG_HEART_COUNT)
            .map(|i| BgHeart::new_random(i as u32 * 31337))
            .collect();
        Self { hearts }
    }

    /// Drift the hearts upward, wrapping at the top
    pub fn update(&mut self, dt: f32) {
        for heart in &mut self.hearts {
            heart.y += heart.vy * dt;
            if heart.y < -0.1 {
                heart.y += 1.2;
            }
        }
    }

    pub fn draw(&self, time: f32) {
        let w = screen_width();
        let h = screen_height();

        // Slow breathing between two gradient pairs
        let breathe = (time * 0.2).sin() * 0.5 + 0.5;
        let top = lerp_color(theme::BG_TOP, theme::BG_TOP_ALT, breathe);
        let bottom = lerp_color(theme::BG_BOTTOM, theme::BG_BOTTOM_ALT, breathe);

        let strip_h = h / GRADIENT_STRIPS as f32;
        for i in 0..GRADIENT_STRIPS {
            let t = i as f32 / (GRADIENT_STRIPS - 1) as f32;
            draw_rectangle(0.0, i as f32 * strip_h, w, strip_h + 1.0, lerp_color(top, bottom, t));
        }

        for heart in &self.hearts {
            let sway_x = (time * heart.sway_speed * std::f32::consts::TAU + heart.phase).sin()
                * heart.sway;
            let color = Color::new(
                theme::BG_HEART.r,
                theme::BG_HEART.g,
                theme::BG_HEART.b,
                theme::BG_HEART.a * heart.alpha,
            );
            draw_heart((heart.x + sway_x) * w, heart.y * h, heart.size, color);
        }
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
