//! Prompt construction for the narrative, suggestion and image calls
//!
//! The game narrates in Brazilian Portuguese; prompts stay in Portuguese so
//! the models keep the register consistent.

use crate::domain::value_objects::{Character, SceneMood, TimeOfDay};

/// System context establishing the narrator persona and house rules
pub fn world_context() -> &'static str {
    "Você é um narrador mestre de RPG épico do mundo de Altherion, especializado em \
criar narrativas envolventes e detalhadas.

REGRAS IMPORTANTES:
1. NUNCA apenas repita a ação do jogador
2. SEMPRE construa uma narrativa rica com detalhes visuais, sonoros e atmosféricos
3. Crie consequências interessantes para cada ação
4. Use linguagem épica e cinematográfica
5. Inclua elementos de suspense, descoberta ou conflito
6. Termine sempre com uma pergunta ou situação que convide à próxima ação
7. Seja conciso e direto - termine sua resposta de forma natural, sem cortes abruptos
8. Adapte o tamanho da narrativa ao contexto - seja mais breve quando necessário"
}

/// The system + user prompt pair sent to every text provider in the chain
#[derive(Debug, Clone)]
pub struct NarrativePrompt {
    pub system: String,
    pub user: String,
}

/// Build the narrative prompt for a player action.
pub fn narrative_prompt(
    character: &Character,
    action: &str,
    previous_context: Option<&str>,
) -> NarrativePrompt {
    let mut user = format!(
        "O herói {} ({}, nível {}) decide {}.",
        character.nome,
        character.classe,
        character.level,
        action.to_lowercase()
    );

    if let Some(context) = previous_context.filter(|c| !c.trim().is_empty()) {
        user.push_str(&format!("\n\nCONTEXTO ANTERIOR: {}", excerpt(context, 500)));
    }

    user.push_str(
        "\n\nINSTRUÇÕES ESPECÍFICAS:\n\
- Crie uma narrativa envolvente e épica\n\
- Seja conciso e direto - termine naturalmente\n\
- NUNCA corte a narrativa no meio de uma frase\n\
- Termine sempre com uma pergunta ou situação que convide à próxima ação",
    );

    NarrativePrompt {
        system: world_context().to_string(),
        user,
    }
}

/// Prompt asking for exactly 4 follow-up player actions.
pub fn suggestion_prompt(narrative: &str, character: &Character) -> String {
    format!(
        "Baseado nesta narrativa de RPG, sugira EXATAMENTE 4 ações específicas que o \
jogador pode fazer:

NARRATIVA: {}

PERSONAGEM: {} ({}, Nível {})

IMPORTANTE: Retorne EXATAMENTE 4 ações específicas, uma por linha, sem numeração ou \
marcadores. Seja criativo e específico baseado no contexto da narrativa.",
        excerpt(narrative, 300),
        character.nome,
        character.classe,
        character.level
    )
}

/// English scene-image prompt embedding mood and lighting descriptors.
pub fn image_prompt(narrative: &str, mood: SceneMood, time_of_day: TimeOfDay) -> String {
    let mood_description = match mood {
        SceneMood::Foggy => "misty, foggy atmosphere",
        SceneMood::Fire => "fire, flames, burning",
        SceneMood::Calm => "peaceful, serene",
        SceneMood::Tense => "tense, dramatic",
        SceneMood::Mystic => "mystical, magical",
    };
    let time_description = match time_of_day {
        TimeOfDay::Day => "bright daylight",
        TimeOfDay::Night => "dark night",
        TimeOfDay::Dawn => "dawn, sunrise",
        TimeOfDay::Dusk => "sunset, dusk",
    };

    format!(
        "Fantasy RPG scene: {} {}, {}, medieval fantasy art style, detailed, atmospheric",
        excerpt(narrative, 200),
        mood_description,
        time_description
    )
}

/// Minimal narrative synthesized when a vendor truncates away the whole
/// answer. A weak answer beats no answer at the last recovery layer.
pub fn degenerate_narrative(character: &Character, action: &str) -> String {
    format!(
        "Você, {}, {}. O que você faz a seguir?",
        character.nome,
        action.to_lowercase()
    )
}

/// First `max_chars` characters, with an ellipsis when truncated.
/// Char-based, never splits a UTF-8 sequence.
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
