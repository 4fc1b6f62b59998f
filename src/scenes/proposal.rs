//! Proposal scene: the question, a yes button, and a no button that
//! refuses to be caught

use macroquad::prelude::*;

use super::{accent_pill, ghost_pill, theme, EnterAnimation, SceneAction};
use crate::ui::{self, Mouse, Rect};

const QUESTION: &str = "Will you be my Valentine?";
const SUBTITLE: &str = "There's no one else I'd rather share this day with.";

const PANEL_W: f32 = 700.0;
const PANEL_H: f32 = 440.0;

pub fn draw(
    time: f32,
    no_offset: Vec2,
    enter: &EnterAnimation,
    mouse: &Mouse,
) -> Option<SceneAction> {
    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0 + enter.dy;

    let panel = Rect::centered(vec2(cx, cy), PANEL_W, PANEL_H);
    ui::draw_rounded_rect(panel, 40.0, enter.fade(theme::PANEL));
    ui::draw_rounded_rect_lines(panel, 40.0, 1.5, enter.fade(theme::PANEL_BORDER));

    // Pulsing heart with a bobbing satellite
    let pulse = 1.0 + (time * 1.6).sin() * 0.05;
    ui::draw_heart(cx, panel.y + 88.0, 72.0 * pulse, enter.fade(theme::HEART));
    let bob = (time * 2.2).sin() * 7.0;
    ui::draw_heart(
        cx + 52.0,
        panel.y + 52.0 + bob,
        22.0,
        enter.fade(theme::HEART_SOFT),
    );

    ui::draw_text_centered(QUESTION, cx, panel.y + 180.0, 46.0, enter.fade(theme::TEXT));
    ui::draw_text_centered(SUBTITLE, cx, panel.y + 226.0, 22.0, enter.fade(theme::TEXT_SOFT));

    let buttons_y = panel.y + PANEL_H - 110.0;
    let yes = Rect::centered(vec2(cx - 130.0, buttons_y + 28.0), 200.0, 58.0);
    if ui::pill_button(mouse, yes, "YES!", &accent_pill(30.0, enter)) {
        return Some(SceneAction::Accept);
    }
    ui::draw_heart(yes.x + yes.w - 34.0, yes.center().y, 18.0, enter.fade(theme::TEXT));

    // The no button drifts to wherever it was last chased to
    let no = Rect::centered(
        vec2(cx + 130.0 + no_offset.x, buttons_y + 28.0 + no_offset.y),
        150.0,
        52.0,
    );
    if mouse.hovering(&no) {
        return Some(SceneAction::DodgeNo);
    }
    ui::pill_button(mouse, no, "No", &ghost_pill(24.0, enter));

    None
}
