//! Reasons scene: the "why I love you" flip cards
//!
//! Each card flips between an icon front and a text back. The 3D turn
//! is faked by squashing the card horizontally through the flip.

use macroquad::prelude::*;

use super::{draw_scroll_hint, theme, EnterAnimation, SceneAction};
use crate::story::{ReasonIcon, Story};
use crate::ui::{self, Mouse, Rect};

/// Flip animation speed (full turns per second)
const FLIP_SPEED: f32 = 2.4;
/// Card aspect (height / width)
const CARD_ASPECT: f32 = 1.35;
const CORNER: f32 = 18.0;

/// One card's flip state
pub struct FlipCard {
    flipped: bool,
    /// 0.0 front at rest, 1.0 back at rest
    progress: f32,
}

impl FlipCard {
    pub fn new() -> Self {
        Self {
            flipped: false,
            progress: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.flipped = false;
        self.progress = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        let target = self.target();
        if self.progress < target {
            self.progress = (self.progress + FLIP_SPEED * dt).min(target);
        } else if self.progress > target {
            self.progress = (self.progress - FLIP_SPEED * dt).max(target);
        }
    }

    fn target(&self) -> f32 {
        if self.flipped {
            1.0
        } else {
            0.0
        }
    }

    fn is_animating(&self) -> bool {
        self.progress != self.target()
    }

    fn flip(&mut self) {
        self.flipped = !self.flipped;
    }
}

pub fn draw(
    story: &Story,
    cards: &mut [FlipCard],
    time: f32,
    enter: &EnterAnimation,
    mouse: &Mouse,
) -> Option<SceneAction> {
    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0 + enter.dy;

    ui::draw_text_centered("Why I Love You", cx, cy - 230.0, 48.0, enter.fade(theme::TEXT));

    // Single row on wide screens, two columns otherwise
    let count = story.reasons.len();
    let columns = if screen_width() >= 900.0 {
        count.max(1)
    } else {
        count.div_ceil(2).max(1)
    };
    let rows = count.div_ceil(columns);

    let gap = 24.0;
    let available = (screen_width() - 160.0).min(1100.0);
    let card_w = ((available - gap * (columns.saturating_sub(1)) as f32) / columns as f32)
        .min(210.0);
    let card_h = card_w * CARD_ASPECT;

    let grid_w = columns as f32 * card_w + columns.saturating_sub(1) as f32 * gap;
    let grid_h = rows as f32 * card_h + rows.saturating_sub(1) as f32 * gap;
    let left = cx - grid_w / 2.0;
    let top = cy - grid_h / 2.0 + 16.0;

    let mut action = None;
    for (i, (reason, card)) in story.reasons.iter().zip(cards.iter_mut()).enumerate() {
        let col = i % columns;
        let row = i / columns;
        let center = vec2(
            left + col as f32 * (card_w + gap) + card_w / 2.0,
            top + row as f32 * (card_h + gap) + card_h / 2.0,
        );

        // Edge-on at the halfway point of the turn
        let squash = (card.progress * std::f32::consts::PI).cos().abs().max(0.02);
        let rect = Rect::centered(center, card_w * squash, card_h);
        let showing_front = card.progress < 0.5;

        if showing_front {
            ui::draw_rounded_rect(rect, CORNER, enter.fade(theme::PANEL));
            ui::draw_rounded_rect_lines(rect, CORNER, 1.5, enter.fade(theme::PANEL_BORDER));
            if squash > 0.3 {
                draw_icon(reason.icon, center.x, center.y - card_h * 0.18, 30.0, enter);
                ui::draw_text_centered(
                    &reason.title,
                    center.x,
                    center.y + card_h * 0.08,
                    22.0,
                    enter.fade(theme::TEXT),
                );
                ui::draw_text_centered(
                    "TAP",
                    center.x,
                    center.y + card_h * 0.32,
                    14.0,
                    enter.fade(theme::TEXT_HINT),
                );
            }
        } else {
            ui::draw_rounded_rect(rect, CORNER, enter.fade(theme::CARD_PAPER));
            ui::draw_rounded_rect_lines(rect, CORNER, 1.5, enter.fade(theme::PANEL_BORDER));
            if squash > 0.3 {
                ui::draw_text_centered(
                    &reason.title,
                    center.x,
                    rect.y + 30.0,
                    20.0,
                    enter.fade(theme::CARD_ACCENT),
                );
                ui::draw_wrapped_text_centered(
                    &reason.content,
                    center.x,
                    rect.y + 52.0,
                    rect.w - 24.0,
                    16.0,
                    20.0,
                    enter.fade(theme::CARD_TEXT),
                );
            }
        }

        let hit = Rect::centered(center, card_w, card_h);
        if mouse.clicked(&hit) && !card.is_animating() {
            card.flip();
            action = Some(SceneAction::FlipCard(i));
        }
    }

    draw_scroll_hint(time, enter.alpha);
    action
}

/// Triangle-fan star with `points` tips
fn star_fan(x: f32, y: f32, points: usize, outer: f32, inner: f32, color: Color) {
    let step = std::f32::consts::PI / points as f32;
    let start = -std::f32::consts::FRAC_PI_2;
    let vertex = |i: usize| {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = start + step * i as f32;
        vec2(x + r * angle.cos(), y + r * angle.sin())
    };
    let center = vec2(x, y);
    for i in 0..points * 2 {
        draw_triangle(center, vertex(i), vertex(i + 1), color);
    }
}

fn draw_icon(icon: ReasonIcon, x: f32, y: f32, size: f32, enter: &EnterAnimation) {
    match icon {
        ReasonIcon::Heart => ui::draw_heart(x, y, size, enter.fade(theme::HEART)),
        ReasonIcon::Sparkle => {
            star_fan(x, y, 4, size * 0.6, size * 0.18, enter.fade(theme::HEART_SOFT))
        }
        ReasonIcon::Star => star_fan(
            x,
            y,
            5,
            size * 0.6,
            size * 0.28,
            enter.fade(Color::new(0.98, 0.80, 0.30, 1.0)),
        ),
        ReasonIcon::Lock => {
            let body = Rect::centered(vec2(x, y + size * 0.12), size * 0.7, size * 0.55);
            ui::draw_rounded_rect(body, 4.0, enter.fade(theme::HEART_SOFT));
            draw_circle_lines(
                x,
                y - size * 0.18,
                size * 0.22,
                3.0,
                enter.fade(theme::HEART_SOFT),
            );
        }
    }
}
