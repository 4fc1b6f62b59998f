//! Evermore: a scroll-driven proposal experience
//!
//! The shell composes the cores: navigation controller, sound engine,
//! story content, presentation. Raw input is translated into controller
//! requests here; the controller reports what happened and the shell
//! fires the matching sounds and particles.

mod audio;
mod narrative;
mod scenes;
mod story;
mod ui;

use macroquad::prelude::*;

use audio::SoundEngine;
use narrative::{NarrativeState, SwipeTracker};
use scenes::{Presentation, SceneAction};

const STORY_PATH: &str = "assets/story.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: "Evermore".to_string(),
        window_width: 1280,
        window_height: 720,
        high_dpi: true,
        ..Default::default()
    }
}

/// A navigation request with its transition chime
fn navigate(nav: &mut NarrativeState, sound: &mut SoundEngine, step: i32) {
    if nav.request_navigate(step).accepted() {
        sound.play_transition();
    }
}

/// Wheel values arrive in platform units: X11 reports one per detent,
/// Windows reports 120 per notch. Normalize detents up so the noise
/// threshold means the same thing everywhere.
fn wheel_units(raw: f32) -> f32 {
    if raw != 0.0 && raw.abs() <= 2.0 {
        raw * 120.0
    } else {
        raw
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let story = story::load_or_default(STORY_PATH);
    let mut nav = NarrativeState::new(story.memories.len());
    let mut sound = SoundEngine::new();
    let mut presentation = Presentation::new(&story);
    let mut swipe = SwipeTracker::default();

    loop {
        let dt = get_frame_time();
        nav.update(dt);
        presentation.update(dt);

        // Platforms refuse audio output before a gesture; unlock on the
        // first click, touch, or key press
        if is_mouse_button_pressed(MouseButton::Left)
            || get_last_key_pressed().is_some()
            || !touches().is_empty()
        {
            sound.ensure_initialized();
        }

        // Scrolling down advances the narrative
        let (_, wheel_y) = mouse_wheel();
        if let Some(step) = narrative::wheel_step(-wheel_units(wheel_y)) {
            navigate(&mut nav, &mut sound, step);
        }

        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => swipe.begin(touch.position.y),
                TouchPhase::Ended => {
                    if let Some(step) = swipe.finish(touch.position.y) {
                        navigate(&mut nav, &mut sound, step);
                    }
                }
                _ => {}
            }
        }

        if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::PageDown) {
            navigate(&mut nav, &mut sound, 1);
        }
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::PageUp) {
            navigate(&mut nav, &mut sound, -1);
        }

        let mouse = ui::Mouse::capture();
        match presentation.draw(&nav, &story, &mouse, sound.muted()) {
            Some(SceneAction::Begin) => navigate(&mut nav, &mut sound, 1),
            Some(SceneAction::FlipCard(_)) => sound.play_card_flip(),
            Some(SceneAction::Accept) => {
                // Success chord and burst fire before the scene changes
                sound.play_success();
                presentation.fire_confetti_burst();
                nav.request_accept();
                presentation.start_confetti_rain();
            }
            Some(SceneAction::DodgeNo) => presentation.dodge_no_button(),
            Some(SceneAction::Replay) => {
                nav.request_replay();
                presentation.reset();
                sound.play_transition();
            }
            Some(SceneAction::ToggleMute) => {
                sound.toggle_mute();
                // The mute control is also a gesture; let it unlock audio
                sound.ensure_initialized();
            }
            None => {}
        }

        next_frame().await;
    }
}
