//! Story content loading
//!
//! The narrative content (partner name, memories, reasons) lives in a
//! RON file so it can be personalized without touching code. A compact
//! built-in story keeps the app runnable when the file is missing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Validation limits to prevent resource exhaustion from malformed files
pub mod limits {
    /// Maximum number of timeline memories
    pub const MAX_MEMORIES: usize = 64;
    /// Maximum number of reason cards
    pub const MAX_REASONS: usize = 16;
    /// Maximum length for titles and the partner name
    pub const MAX_TITLE_LEN: usize = 128;
    /// Maximum length for descriptions and reason text
    pub const MAX_TEXT_LEN: usize = 512;
    /// Maximum length for image paths
    pub const MAX_PATH_LEN: usize = 256;
}

/// Error type for story loading
#[derive(Debug)]
pub enum StoryError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for StoryError {
    fn from(e: std::io::Error) -> Self {
        StoryError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for StoryError {
    fn from(e: ron::error::SpannedError) -> Self {
        StoryError::ParseError(e)
    }
}

impl std::fmt::Display for StoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryError::IoError(e) => write!(f, "IO error: {}", e),
            StoryError::ParseError(e) => write!(f, "Parse error: {}", e),
            StoryError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// One photo memory on the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub title: String,
    pub description: String,
    /// Path to the photo, relative to the working directory
    pub image: String,
}

/// Icon drawn on the front of a reason card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonIcon {
    Heart,
    Sparkle,
    Star,
    Lock,
}

/// One flip card on the reasons grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reason {
    pub title: String,
    pub content: String,
    pub icon: ReasonIcon,
}

/// The full narrative content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub partner_name: String,
    pub memories: Vec<Memory>,
    pub reasons: Vec<Reason>,
}

fn validate_len(s: &str, max: usize, context: &str) -> Result<(), String> {
    if s.len() > max {
        return Err(format!("{}: too long ({} > {})", context, s.len(), max));
    }
    Ok(())
}

/// Validate a memory entry
fn validate_memory(memory: &Memory, context: &str) -> Result<(), String> {
    validate_len(
        &memory.title,
        limits::MAX_TITLE_LEN,
        &format!("{} title", context),
    )?;
    validate_len(
        &memory.description,
        limits::MAX_TEXT_LEN,
        &format!("{} description", context),
    )?;
    validate_len(
        &memory.image,
        limits::MAX_PATH_LEN,
        &format!("{} image", context),
    )?;
    Ok(())
}

/// Validate a reason card
fn validate_reason(reason: &Reason, context: &str) -> Result<(), String> {
    validate_len(
        &reason.title,
        limits::MAX_TITLE_LEN,
        &format!("{} title", context),
    )?;
    validate_len(
        &reason.content,
        limits::MAX_TEXT_LEN,
        &format!("{} content", context),
    )?;
    Ok(())
}

/// Validate an entire story
pub fn validate_story(story: &Story) -> Result<(), StoryError> {
    validate_len(&story.partner_name, limits::MAX_TITLE_LEN, "partner_name")
        .map_err(StoryError::ValidationError)?;

    if story.memories.is_empty() {
        return Err(StoryError::ValidationError(
            "story needs at least one memory".to_string(),
        ));
    }
    if story.memories.len() > limits::MAX_MEMORIES {
        return Err(StoryError::ValidationError(format!(
            "too many memories ({} > {})",
            story.memories.len(),
            limits::MAX_MEMORIES
        )));
    }
    if story.reasons.len() > limits::MAX_REASONS {
        return Err(StoryError::ValidationError(format!(
            "too many reasons ({} > {})",
            story.reasons.len(),
            limits::MAX_REASONS
        )));
    }

    for (i, memory) in story.memories.iter().enumerate() {
        validate_memory(memory, &format!("memory[{}]", i)).map_err(StoryError::ValidationError)?;
    }
    for (i, reason) in story.reasons.iter().enumerate() {
        validate_reason(reason, &format!("reason[{}]", i)).map_err(StoryError::ValidationError)?;
    }

    Ok(())
}

/// Load a story from a RON file
pub fn load_story<P: AsRef<Path>>(path: P) -> Result<Story, StoryError> {
    let contents = fs::read_to_string(path)?;
    load_story_from_str(&contents)
}

/// Load a story from a RON string (for testing)
pub fn load_story_from_str(s: &str) -> Result<Story, StoryError> {
    let story: Story = ron::from_str(s)?;
    validate_story(&story)?;
    Ok(story)
}

/// Load the story file, falling back to the built-in story when the
/// file is missing or malformed
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Story {
    match load_story(path.as_ref()) {
        Ok(story) => story,
        Err(e) => {
            log::warn!(
                "could not load story from {}: {} (using built-in story)",
                path.as_ref().display(),
                e
            );
            default_story()
        }
    }
}

/// Built-in story used when no story file is present
pub fn default_story() -> Story {
    let memory = |title: &str, description: &str, image: &str| Memory {
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    };
    let reason = |title: &str, content: &str, icon: ReasonIcon| Reason {
        title: title.to_string(),
        content: content.to_string(),
        icon,
    };

    Story {
        partner_name: "My Love".to_string(),
        memories: vec![
            memory(
                "Where It Began",
                "A small table, two cups of coffee, and a conversation neither of us wanted to end.",
                "assets/images/memory01.png",
            ),
            memory(
                "The Long Walk",
                "We missed the last bus on purpose. The city felt like it belonged to us.",
                "assets/images/memory02.png",
            ),
            memory(
                "Quiet Shelter",
                "Rain on the window, your head on my shoulder. Nothing else needed saying.",
                "assets/images/memory03.png",
            ),
        ],
        reasons: vec![
            reason(
                "Your Laughter",
                "It is the most beautiful sound in the world. It lights up the darkest rooms.",
                ReasonIcon::Sparkle,
            ),
            reason(
                "Your Strength",
                "You handle life's challenges with such grace. I am constantly in awe of you.",
                ReasonIcon::Star,
            ),
            reason(
                "Us",
                "I love who I am when I'm with you. We make the perfect team.",
                ReasonIcon::Lock,
            ),
            reason(
                "Everything",
                "You have this way of pulling me closer without even trying.",
                ReasonIcon::Heart,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_story_is_valid() {
        let story = default_story();
        assert!(validate_story(&story).is_ok());
        assert!(!story.memories.is_empty());
        assert_eq!(story.reasons.len(), 4);
    }

    #[test]
    fn test_parse_round_trip() {
        let story = default_story();
        let text = ron::ser::to_string_pretty(&story, ron::ser::PrettyConfig::new())
            .expect("serialize story");
        let parsed = load_story_from_str(&text).expect("parse story");
        assert_eq!(parsed.partner_name, story.partner_name);
        assert_eq!(parsed.memories.len(), story.memories.len());
    }

    #[test]
    fn test_empty_memories_rejected() {
        let mut story = default_story();
        story.memories.clear();
        assert!(matches!(
            validate_story(&story),
            Err(StoryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_oversized_field_rejected() {
        let mut story = default_story();
        story.memories[0].description = "x".repeat(limits::MAX_TEXT_LEN + 1);
        assert!(validate_story(&story).is_err());
    }

    #[test]
    fn test_malformed_ron_rejected() {
        assert!(matches!(
            load_story_from_str("(partner_name: "),
            Err(StoryError::ParseError(_))
        ));
    }
}
