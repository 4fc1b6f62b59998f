//! Hero scene: title card and the invitation to begin

use macroquad::prelude::*;

use super::{accent_pill, draw_scroll_hint, theme, EnterAnimation, SceneAction};
use crate::story::Story;
use crate::ui::{self, Mouse, Rect};

pub fn draw(
    story: &Story,
    time: f32,
    enter: &EnterAnimation,
    mouse: &Mouse,
) -> Option<SceneAction> {
    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0 + enter.dy;

    // Pulsing heart with a small satellite bobbing beside it
    let pulse = 1.0 + (time * 2.0).sin() * 0.06;
    ui::draw_heart(cx, cy - 160.0, 84.0 * pulse, enter.fade(theme::HEART));
    let bob = (time * 1.6).sin() * 8.0;
    ui::draw_heart(cx + 64.0, cy - 196.0 + bob, 26.0, enter.fade(theme::HEART_SOFT));

    ui::draw_text_centered(
        &format!("For {}", story.partner_name),
        cx,
        cy - 52.0,
        64.0,
        enter.fade(theme::TEXT),
    );
    ui::draw_text_centered(
        "A little story about us, with a question at the end.",
        cx,
        cy + 8.0,
        26.0,
        enter.fade(theme::TEXT_SOFT),
    );

    let button = Rect::centered(vec2(cx, cy + 96.0), 270.0, 56.0);
    let begin = ui::pill_button(mouse, button, "Begin Our Story", &accent_pill(28.0, enter));

    draw_scroll_hint(time, enter.alpha);
    begin.then_some(SceneAction::Begin)
}
