//! Scene Rendering
//!
//! Full-screen presentation of the narrative: a gradient backdrop with
//! drifting hearts, one draw function per scene, and overlay controls.
//! Scene functions are pure draws over the navigation state; a click
//! resolves to a [`SceneAction`] that the shell dispatches.

mod background;
mod celebration;
mod confetti;
mod hero;
mod proposal;
mod reasons;
mod timeline;

use macroquad::prelude::*;

use crate::narrative::{NarrativeState, Scene};
use crate::story::Story;
use crate::ui::{self, Mouse, Rect};

use background::Background;
use confetti::Confetti;
use reasons::FlipCard;
use timeline::PhotoCache;

/// Visual theme colors
pub mod theme {
    use macroquad::prelude::Color;

    /// Backdrop gradient, top (deep indigo)
    pub const BG_TOP: Color = Color::new(0.23, 0.16, 0.44, 1.0);
    /// Backdrop gradient, top, breathing target (violet)
    pub const BG_TOP_ALT: Color = Color::new(0.32, 0.15, 0.48, 1.0);
    /// Backdrop gradient, bottom (dusky pink)
    pub const BG_BOTTOM: Color = Color::new(0.56, 0.21, 0.46, 1.0);
    /// Backdrop gradient, bottom, breathing target (rose)
    pub const BG_BOTTOM_ALT: Color = Color::new(0.64, 0.26, 0.40, 1.0);
    /// Drifting background hearts
    pub const BG_HEART: Color = Color::new(1.0, 0.65, 0.80, 0.16);
    /// Primary text
    pub const TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Secondary text
    pub const TEXT_SOFT: Color = Color::new(1.0, 1.0, 1.0, 0.78);
    /// Dim hint text
    pub const TEXT_HINT: Color = Color::new(1.0, 1.0, 1.0, 0.45);
    /// Frosted panel fill
    pub const PANEL: Color = Color::new(1.0, 1.0, 1.0, 0.10);
    /// Frosted panel fill, hovered
    pub const PANEL_HOVER: Color = Color::new(1.0, 1.0, 1.0, 0.18);
    /// Panel borders
    pub const PANEL_BORDER: Color = Color::new(1.0, 1.0, 1.0, 0.30);
    /// Accent pink
    pub const ACCENT: Color = Color::new(0.93, 0.36, 0.61, 1.0);
    /// Accent pink, hovered
    pub const ACCENT_HOVER: Color = Color::new(0.97, 0.48, 0.70, 1.0);
    /// Big heart red
    pub const HEART: Color = Color::new(0.94, 0.27, 0.34, 1.0);
    /// Small satellite heart pink
    pub const HEART_SOFT: Color = Color::new(0.98, 0.62, 0.76, 1.0);
    /// Flipped card paper
    pub const CARD_PAPER: Color = Color::new(0.99, 0.94, 0.96, 1.0);
    /// Text on card paper
    pub const CARD_TEXT: Color = Color::new(0.36, 0.28, 0.33, 1.0);
    /// Accent on card paper
    pub const CARD_ACCENT: Color = Color::new(0.86, 0.29, 0.52, 1.0);
    /// Confetti palette
    pub const CONFETTI: [Color; 7] = [
        Color::new(0.96, 0.45, 0.71, 1.0),
        Color::new(0.66, 0.33, 0.97, 1.0),
        Color::new(0.91, 0.47, 0.98, 1.0),
        Color::new(0.98, 0.75, 0.14, 1.0),
        Color::new(0.98, 0.44, 0.52, 1.0),
        Color::new(0.75, 0.52, 0.99, 1.0),
        Color::new(0.98, 0.66, 0.83, 1.0),
    ];
}

/// What a click on scene content resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    /// Advance out of the hero scene
    Begin,
    /// A reason card was flipped
    FlipCard(usize),
    /// The yes button
    Accept,
    /// The no button was approached; move it somewhere else
    DodgeNo,
    /// Start over from the celebration scene
    Replay,
    /// The speaker toggle in the corner
    ToggleMute,
}

/// Vertical slide distance for scene enters (pixels)
const ENTER_SLIDE: f32 = 100.0;
/// Evasive button travel limit (pixels either way)
const NO_BUTTON_RANGE: f32 = 150.0;

/// Slide-and-fade applied to scene content while a transition settles
pub struct EnterAnimation {
    pub dy: f32,
    pub alpha: f32,
}

impl EnterAnimation {
    fn from_nav(nav: &NarrativeState) -> Self {
        let progress = nav.transition_progress();
        // cubic ease-out
        let eased = 1.0 - (1.0 - progress).powi(3);
        Self {
            dy: (1.0 - eased) * ENTER_SLIDE * nav.direction() as f32,
            alpha: eased.clamp(0.0, 1.0),
        }
    }

    pub fn fade(&self, color: Color) -> Color {
        Color::new(color.r, color.g, color.b, color.a * self.alpha)
    }
}

/// Presentation-only state: particles, card flips, photo textures.
/// None of it feeds back into navigation.
pub struct Presentation {
    background: Background,
    cards: Vec<FlipCard>,
    photos: PhotoCache,
    confetti: Confetti,
    no_offset: Vec2,
}

impl Presentation {
    pub fn new(story: &Story) -> Self {
        Self {
            background: Background::new(),
            cards: story.reasons.iter().map(|_| FlipCard::new()).collect(),
            photos: PhotoCache::new(),
            confetti: Confetti::new(),
            no_offset: Vec2::ZERO,
        }
    }

    /// Advance animations (call once per frame)
    pub fn update(&mut self, dt: f32) {
        self.background.update(dt);
        for card in &mut self.cards {
            card.update(dt);
        }
        self.confetti.update(dt);
    }

    /// Accept side effect: radial burst from behind the proposal card
    pub fn fire_confetti_burst(&mut self) {
        let origin = vec2(screen_width() / 2.0, screen_height() * 0.6);
        self.confetti.burst(origin, 150, 70.0);
    }

    /// Celebration entry: a few seconds of falling confetti
    pub fn start_confetti_rain(&mut self) {
        self.confetti.rain(200, 3.0);
    }

    /// Back to an unflipped, settled presentation (replay)
    pub fn reset(&mut self) {
        for card in &mut self.cards {
            card.reset();
        }
        self.confetti.clear();
        self.no_offset = Vec2::ZERO;
    }

    /// Jump the evasive button to a fresh random offset
    pub fn dodge_no_button(&mut self) {
        self.no_offset = vec2(
            macroquad::rand::gen_range(-NO_BUTTON_RANGE, NO_BUTTON_RANGE),
            macroquad::rand::gen_range(-NO_BUTTON_RANGE, NO_BUTTON_RANGE),
        );
    }

    /// Draw the full frame and report the action a click resolved to
    pub fn draw(
        &mut self,
        nav: &NarrativeState,
        story: &Story,
        mouse: &Mouse,
        muted: bool,
    ) -> Option<SceneAction> {
        self.background.draw(nav.time());

        let enter = EnterAnimation::from_nav(nav);
        let mut action = match nav.scene() {
            Scene::Hero => hero::draw(story, nav.time(), &enter, mouse),
            Scene::Timeline => timeline::draw(story, nav, &mut self.photos, &enter),
            Scene::Reasons => reasons::draw(story, &mut self.cards, nav.time(), &enter, mouse),
            Scene::Proposal => proposal::draw(nav.time(), self.no_offset, &enter, mouse),
            Scene::Celebration => celebration::draw(story, nav.time(), &enter, mouse),
        };

        self.confetti.draw();

        if draw_mute_button(mouse, muted) {
            action = Some(SceneAction::ToggleMute);
        }
        action
    }
}

/// Pill style for primary (accent) buttons
fn accent_pill(font_size: f32, enter: &EnterAnimation) -> ui::PillStyle {
    ui::PillStyle {
        fill: enter.fade(theme::ACCENT),
        fill_hover: enter.fade(theme::ACCENT_HOVER),
        border: enter.fade(theme::PANEL_BORDER),
        text: enter.fade(theme::TEXT),
        font_size,
    }
}

/// Pill style for quiet (frosted) buttons
fn ghost_pill(font_size: f32, enter: &EnterAnimation) -> ui::PillStyle {
    ui::PillStyle {
        fill: enter.fade(theme::PANEL),
        fill_hover: enter.fade(theme::PANEL_HOVER),
        border: enter.fade(theme::PANEL_BORDER),
        text: enter.fade(theme::TEXT_SOFT),
        font_size,
    }
}

/// Bobbing "scroll" hint at the bottom of gesture-navigated scenes
fn draw_scroll_hint(time: f32, alpha: f32) {
    let cx = screen_width() / 2.0;
    let base_y = screen_height() - 64.0;
    let pulse = (time * 2.5).sin() * 0.5 + 0.5;
    let a = alpha * (0.35 + 0.4 * pulse);
    let color = Color::new(1.0, 1.0, 1.0, a);

    ui::draw_text_centered("S C R O L L", cx, base_y, 16.0, color);
    let bob = (time * 2.5).sin() * 3.0;
    let y = base_y + 18.0 + bob;
    draw_line(cx - 8.0, y, cx, y + 7.0, 2.0, color);
    draw_line(cx, y + 7.0, cx + 8.0, y, 2.0, color);
}

/// Speaker toggle in the top-right corner, returns true if clicked
fn draw_mute_button(mouse: &Mouse, muted: bool) -> bool {
    let center = vec2(screen_width() - 44.0, 44.0);
    let rect = Rect::centered(center, 44.0, 44.0);
    let hovered = mouse.hovering(&rect);

    draw_circle(
        center.x,
        center.y,
        22.0,
        if hovered { theme::PANEL_HOVER } else { theme::PANEL },
    );
    draw_circle_lines(center.x, center.y, 22.0, 1.0, theme::PANEL_BORDER);

    // Speaker body and cone
    let color = if muted { theme::TEXT_HINT } else { theme::TEXT };
    draw_rectangle(center.x - 10.0, center.y - 4.0, 6.0, 8.0, color);
    draw_triangle(
        vec2(center.x - 6.0, center.y - 4.0),
        vec2(center.x - 6.0, center.y + 4.0),
        vec2(center.x + 1.0, center.y),
        color,
    );
    draw_triangle(
        vec2(center.x - 6.0, center.y - 4.0),
        vec2(center.x + 1.0, center.y - 8.0),
        vec2(center.x + 1.0, center.y),
        color,
    );
    draw_triangle(
        vec2(center.x - 6.0, center.y + 4.0),
        vec2(center.x + 1.0, center.y + 8.0),
        vec2(center.x + 1.0, center.y),
        color,
    );

    if muted {
        // Slash across the waves
        draw_line(center.x + 3.0, center.y - 6.0, center.x + 11.0, center.y + 6.0, 2.0, color);
    } else {
        // Two sound arcs
        for (r, t) in [(5.0, 1.5), (9.0, 1.2)] {
            let steps = 8;
            for i in 0..steps {
                let a0 = -0.9 + 1.8 * i as f32 / steps as f32;
                let a1 = -0.9 + 1.8 * (i + 1) as f32 / steps as f32;
                draw_line(
                    center.x + 2.0 + r * a0.cos(),
                    center.y + r * a0.sin(),
                    center.x + 2.0 + r * a1.cos(),
                    center.y + r * a1.sin(),
                    t,
                    color,
                );
            }
        }
    }

    mouse.clicked(&rect)
}
