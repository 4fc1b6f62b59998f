//! Celebration scene: she said yes

use macroquad::prelude::*;

use super::{accent_pill, theme, EnterAnimation, SceneAction};
use crate::story::Story;
use crate::ui::{self, Mouse, Rect};

const PANEL_W: f32 = 520.0;
const PANEL_H: f32 = 420.0;

pub fn draw(
    story: &Story,
    time: f32,
    enter: &EnterAnimation,
    mouse: &Mouse,
) -> Option<SceneAction> {
    // Dim the backdrop so the card glows
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::new(0.07, 0.03, 0.14, 0.55 * enter.alpha),
    );

    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0 + enter.dy;

    let panel = Rect::centered(vec2(cx, cy), PANEL_W, PANEL_H);
    ui::draw_rounded_rect(panel, 32.0, enter.fade(Color::new(1.0, 1.0, 1.0, 0.08)));
    ui::draw_rounded_rect_lines(
        panel,
        32.0,
        1.5,
        enter.fade(Color::new(0.75, 0.52, 0.99, 0.35)),
    );

    let pulse = 1.0 + (time * 2.4).sin() * 0.08;
    ui::draw_heart(cx, panel.y + 92.0, 76.0 * pulse, enter.fade(theme::HEART));

    ui::draw_text_centered("YES!", cx, panel.y + 178.0, 56.0, enter.fade(theme::TEXT));
    ui::draw_text_centered(
        &format!("I love you, {}.", story.partner_name),
        cx,
        panel.y + 224.0,
        26.0,
        enter.fade(theme::TEXT_SOFT),
    );
    ui::draw_text_centered(
        "Thank you for making me the happiest person alive.",
        cx,
        panel.y + 256.0,
        20.0,
        enter.fade(theme::TEXT_SOFT),
    );

    let button = Rect::centered(vec2(cx, panel.y + PANEL_H - 72.0), 250.0, 52.0);
    let replay = ui::pill_button(mouse, button, "Replay Our Story", &accent_pill(24.0, enter));
    replay.then_some(SceneAction::Replay)
}
