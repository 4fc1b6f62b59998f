//! Confetti particles
//!
//! Two emission modes: a radial burst (fired when the proposal is
//! accepted) and a timed rain from the top edge (the celebration scene).
//! Pieces are retired once they fall off screen.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use super::theme;

/// Downward acceleration for burst pieces (px/s^2)
const BURST_GRAVITY: f32 = 900.0;
/// Rain falls gently
const RAIN_GRAVITY: f32 = 220.0;

struct Piece {
    pos: Vec2,
    vel: Vec2,
    rot: f32,
    rot_vel: f32,
    size: f32,
    color: Color,
    gravity: f32,
}

pub struct Confetti {
    pieces: Vec<Piece>,
    /// Seconds of rain emission left
    rain_timer: f32,
    /// Pieces per second while raining
    rain_rate: f32,
}

impl Confetti {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            rain_timer: 0.0,
            rain_rate: 0.0,
        }
    }

    fn pick_color() -> Color {
        theme::CONFETTI[gen_range(0u32, theme::CONFETTI.len() as u32) as usize]
    }

    /// Radial burst from a point, `spread_deg` wide around straight up
    pub fn burst(&mut self, origin: Vec2, count: usize, spread_deg: f32) {
        for _ in 0..count {
            let angle = (-90.0 + gen_range(-spread_deg / 2.0, spread_deg / 2.0)).to_radians();
            let speed = gen_range(250.0, 700.0);
            self.pieces.push(Piece {
                pos: origin,
                vel: vec2(angle.cos(), angle.sin()) * speed,
                rot: gen_range(0.0, 360.0),
                rot_vel: gen_range(-360.0, 360.0),
                size: gen_range(3.5, 7.0),
                color: Self::pick_color(),
                gravity: BURST_GRAVITY * gen_range(0.7, 1.3),
            });
        }
    }

    /// Emit falling pieces from the top edge for `secs` seconds
    pub fn rain(&mut self, count: usize, secs: f32) {
        self.rain_timer = secs;
        self.rain_rate = count as f32 / secs;
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
        self.rain_timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.rain_timer > 0.0 {
            self.rain_timer -= dt;
            let emit = (self.rain_rate * dt).ceil() as usize;
            for _ in 0..emit {
                self.pieces.push(Piece {
                    pos: vec2(gen_range(0.0, screen_width()), -12.0),
                    vel: vec2(gen_range(-40.0, 40.0), gen_range(40.0, 140.0)),
                    rot: gen_range(0.0, 360.0),
                    rot_vel: gen_range(-240.0, 240.0),
                    size: gen_range(3.5, 7.0),
                    color: Self::pick_color(),
                    gravity: RAIN_GRAVITY * gen_range(0.7, 1.3),
                });
            }
        }

        let floor = screen_height() + 20.0;
        for piece in &mut self.pieces {
            piece.vel.y += piece.gravity * dt;
            piece.pos += piece.vel * dt;
            piece.rot += piece.rot_vel * dt;
        }
        self.pieces.retain(|p| p.pos.y < floor);
    }

    pub fn draw(&self) {
        for piece in &self.pieces {
            draw_poly(piece.pos.x, piece.pos.y, 4, piece.size, piece.rot, piece.color);
        }
    }
}
