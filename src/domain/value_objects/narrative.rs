//! Narrative result value objects
//!
//! The scene classification enums carry keyword detection for providers that
//! return free text only. Narratives are written in Brazilian Portuguese, so
//! the keyword sets cover Portuguese first with a few English spillovers for
//! models that ignore the language instruction.

use serde::{Deserialize, Serialize};

use super::{Character, GenerationSettings};

/// Visual mood of the generated scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMood {
    Foggy,
    Fire,
    Calm,
    Tense,
    Mystic,
}

impl SceneMood {
    /// Classify a narrative by keyword inspection.
    ///
    /// Categories are checked in a fixed priority order (fog, fire, tense,
    /// mystic); the first match wins and absence of all defaults to calm.
    pub fn detect(narrative: &str) -> Self {
        let text = narrative.to_lowercase();

        if contains_any(&text, &["névoa", "neblina", "mistério", "fog", "mist"]) {
            return Self::Foggy;
        }
        if contains_any(&text, &["fogo", "chamas", "queimar", "fire", "flame"]) {
            return Self::Fire;
        }
        if contains_any(&text, &["tenso", "perigo", "ameaça", "bandido", "danger"]) {
            return Self::Tense;
        }
        if contains_any(&text, &["mágico", "encantado", "arcano", "magic", "arcane"]) {
            return Self::Mystic;
        }
        Self::Calm
    }
}

/// Time of day for scene lighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
    Dawn,
    Dusk,
}

impl TimeOfDay {
    pub fn detect(narrative: &str) -> Self {
        let text = narrative.to_lowercase();

        if contains_any(&text, &["noite", "escuro", "lua", "night", "moon"]) {
            return Self::Night;
        }
        if contains_any(&text, &["alvorecer", "amanhecer", "nascer do sol", "dawn"]) {
            return Self::Dawn;
        }
        if contains_any(&text, &["entardecer", "pôr do sol", "crepúsculo", "dusk", "sunset"]) {
            return Self::Dusk;
        }
        Self::Day
    }
}

/// Kind of game event the narrative describes, used by the XP policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NarrativeEvent {
    ExperienceGain,
    Combat,
    Exploration,
    Social,
}

impl NarrativeEvent {
    pub fn detect(narrative: &str) -> Self {
        let text = narrative.to_lowercase();

        if contains_any(&text, &["luta", "combate", "batalha", "battle", "combat"]) {
            return Self::Combat;
        }
        if contains_any(&text, &["conversa", "fala", "diálogo", "dialogue"]) {
            return Self::Social;
        }
        Self::Exploration
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Everything the engine needs to produce one narrative turn.
///
/// Request-scoped value: constructed by the HTTP facade, discarded when the
/// response is written. `settings` is already normalized at this point.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub character: Character,
    pub action: String,
    pub previous_context: Option<String>,
    pub settings: GenerationSettings,
}

/// The normalized outcome of a successful generation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResult {
    pub narrative: String,
    pub scene_mood: SceneMood,
    pub time_of_day: TimeOfDay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<NarrativeEvent>,
    pub xp: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_detection_priority_order() {
        // Fog beats fire even when both keywords appear
        assert_eq!(
            SceneMood::detect("A névoa cobre o fogo distante"),
            SceneMood::Foggy
        );
        assert_eq!(SceneMood::detect("As chamas sobem pela torre"), SceneMood::Fire);
        assert_eq!(
            SceneMood::detect("Você sente o perigo à espreita"),
            SceneMood::Tense
        );
        assert_eq!(SceneMood::detect("Um brilho arcano envolve a sala"), SceneMood::Mystic);
        assert_eq!(SceneMood::detect("Os pássaros cantam na clareira"), SceneMood::Calm);
    }

    #[test]
    fn test_time_of_day_detection() {
        assert_eq!(TimeOfDay::detect("A lua ilumina o caminho"), TimeOfDay::Night);
        assert_eq!(TimeOfDay::detect("O amanhecer tinge o céu"), TimeOfDay::Dawn);
        assert_eq!(TimeOfDay::detect("O crepúsculo cai sobre a vila"), TimeOfDay::Dusk);
        assert_eq!(TimeOfDay::detect("O sol brilha alto"), TimeOfDay::Day);
    }

    #[test]
    fn test_event_detection() {
        assert_eq!(
            NarrativeEvent::detect("A batalha começa nos portões"),
            NarrativeEvent::Combat
        );
        assert_eq!(
            NarrativeEvent::detect("O taverneiro puxa conversa"),
            NarrativeEvent::Social
        );
        assert_eq!(
            NarrativeEvent::detect("Você segue pela trilha antiga"),
            NarrativeEvent::Exploration
        );
    }

    #[test]
    fn test_result_serializes_camel_case_kebab_enums() {
        let result = NarrativeResult {
            narrative: "Você avança.".to_string(),
            scene_mood: SceneMood::Tense,
            time_of_day: TimeOfDay::Night,
            event: Some(NarrativeEvent::ExperienceGain),
            xp: 20,
            image_url: None,
            suggestions: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sceneMood"], "tense");
        assert_eq!(json["timeOfDay"], "night");
        assert_eq!(json["event"], "experience-gain");
        assert!(json.get("imageUrl").is_none());
    }
}
