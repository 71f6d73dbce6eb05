//! Persona profile parsing.
//!
//! The generator is asked to describe a character as JSON. Unparseable
//! output yields a profile named "Unknown Director" so a director can still
//! be created from the raw prompt.

use crate::core::ids::DirectorId;
use crate::core::string::strip_code_fence;
use crate::meeting::Director;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown Director";
pub const UNKNOWN_TITLE: &str = "Historical Figure";

/// Structured character description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaProfile {
    pub name: String,
    pub title: String,
    pub era: String,
    pub personality_traits: Vec<String>,
    pub core_beliefs: Vec<String>,
    pub speaking_style: String,
    pub expertise_areas: Vec<String>,
}

impl PersonaProfile {
    pub fn fallback() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            ..Self::default()
        }
    }

    /// Build a director whose background is the character prompt plus the
    /// extracted speaking style and beliefs.
    pub fn into_director(self, id: DirectorId, character_prompt: &str) -> Director {
        let mut background = character_prompt.trim().to_string();
        if !self.era.is_empty() {
            background.push_str(&format!("\n\nEra: {}", self.era));
        }
        if !self.speaking_style.is_empty() {
            background.push_str(&format!("\nSpeaking style: {}", self.speaking_style));
        }
        if !self.core_beliefs.is_empty() {
            background.push_str(&format!("\nCore beliefs: {}", self.core_beliefs.join("; ")));
        }
        Director::new(id, self.name, self.title, background)
    }

    /// Lowercase slug of the name, usable as a director id
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.name.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            "director".to_string()
        } else {
            slug.to_string()
        }
    }
}

/// Result of [`parse_persona`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaParse {
    Parsed(PersonaProfile),
    Fallback { profile: PersonaProfile, error: String },
}

impl PersonaParse {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PersonaParse::Fallback { .. })
    }

    pub fn into_profile(self) -> PersonaProfile {
        match self {
            PersonaParse::Parsed(profile) | PersonaParse::Fallback { profile, .. } => profile,
        }
    }
}

/// Parse a generated persona, defaulting a blank name or title
pub fn parse_persona(text: &str) -> PersonaParse {
    match serde_json::from_str::<PersonaProfile>(strip_code_fence(text)) {
        Ok(mut profile) => {
            profile.name = profile.name.trim().to_string();
            profile.title = profile.title.trim().to_string();
            if profile.name.is_empty() {
                profile.name = UNKNOWN_NAME.to_string();
            }
            if profile.title.is_empty() {
                profile.title = UNKNOWN_TITLE.to_string();
            }
            PersonaParse::Parsed(profile)
        }
        Err(e) => PersonaParse::Fallback {
            profile: PersonaProfile::fallback(),
            error: e.to_string(),
        },
    }
}
