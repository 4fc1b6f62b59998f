//! Timeline scene: one memory at a time
//!
//! A framed photo with its caption, progress dots below, and the scroll
//! hint. Memory steps crossfade rather than slide, so the card reads as
//! the same object turning a page.

use std::collections::HashMap;

use macroquad::prelude::*;

use super::{draw_scroll_hint, theme, EnterAnimation, SceneAction};
use crate::narrative::NarrativeState;
use crate::story::Story;
use crate::ui::{self, Rect};

/// Card dimensions
const CARD_W: f32 = 540.0;
const CARD_H: f32 = 540.0;
const PHOTO_H: f32 = 330.0;
const CORNER: f32 = 24.0;

/// Lazily decoded photo textures, keyed by path. Failures are cached so
/// a missing file logs once, not every frame.
pub struct PhotoCache {
    textures: HashMap<String, Option<Texture2D>>,
}

impl PhotoCache {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    fn load(path: &str) -> Option<Texture2D> {
        let bytes = std::fs::read(path)
            .map_err(|e| log::warn!("photo {} unavailable: {}", path, e))
            .ok()?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| log::warn!("photo {} failed to decode: {}", path, e))
            .ok()?;
        let rgba = decoded.to_rgba8();
        let (w, h) = rgba.dimensions();
        Some(Texture2D::from_rgba8(w as u16, h as u16, &rgba.into_raw()))
    }

    pub fn get(&mut self, path: &str) -> Option<&Texture2D> {
        self.textures
            .entry(path.to_string())
            .or_insert_with(|| Self::load(path))
            .as_ref()
    }
}

pub fn draw(
    story: &Story,
    nav: &NarrativeState,
    photos: &mut PhotoCache,
    enter: &EnterAnimation,
) -> Option<SceneAction> {
    let cx = screen_width() / 2.0;
    let cy = screen_height() / 2.0;

    let memory = &story.memories[nav.memory_index().min(story.memories.len() - 1)];

    let card = Rect::centered(vec2(cx, cy - 16.0), CARD_W, CARD_H);
    ui::draw_rounded_rect(card, CORNER, enter.fade(theme::PANEL));
    ui::draw_rounded_rect_lines(card, CORNER, 1.5, enter.fade(theme::PANEL_BORDER));

    // Photo area, letterboxed inside its frame
    let frame = Rect::new(card.x + 28.0, card.y + 28.0, card.w - 56.0, PHOTO_H);
    ui::draw_rounded_rect(frame, 12.0, enter.fade(Color::new(0.0, 0.0, 0.0, 0.25)));
    match photos.get(&memory.image) {
        Some(texture) => {
            let scale = (frame.w / texture.width()).min(frame.h / texture.height());
            let w = texture.width() * scale;
            let h = texture.height() * scale;
            draw_texture_ex(
                texture,
                frame.x + (frame.w - w) / 2.0,
                frame.y + (frame.h - h) / 2.0,
                enter.fade(WHITE),
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            );
        }
        None => {
            // Placeholder frame when the photo is missing
            ui::draw_heart(
                frame.x + frame.w / 2.0,
                frame.y + frame.h / 2.0,
                64.0,
                enter.fade(theme::HEART_SOFT),
            );
        }
    }
    ui::draw_rounded_rect_lines(frame, 12.0, 1.0, enter.fade(theme::PANEL_BORDER));

    let text_top = frame.y + frame.h + 40.0;
    ui::draw_text_centered(&memory.title, cx, text_top, 36.0, enter.fade(theme::TEXT));
    ui::draw_wrapped_text_centered(
        &memory.description,
        cx,
        text_top + 26.0,
        card.w - 80.0,
        21.0,
        26.0,
        enter.fade(theme::TEXT_SOFT),
    );

    draw_progress_dots(
        cx,
        card.y + card.h + 30.0,
        nav.memory_count(),
        nav.memory_index(),
        enter,
    );

    draw_scroll_hint(nav.time(), enter.alpha);
    None
}

fn draw_progress_dots(
    cx: f32,
    y: f32,
    count: usize,
    current: usize,
    enter: &EnterAnimation,
) {
    let spacing = 18.0;
    let left = cx - (count.saturating_sub(1) as f32 * spacing) / 2.0;
    for i in 0..count {
        let x = left + i as f32 * spacing;
        if i == current {
            draw_circle(x, y, 5.5, enter.fade(theme::ACCENT));
        } else {
            draw_circle(x, y, 3.5, enter.fade(theme::TEXT_HINT));
        }
    }
}
