//! Player character value objects
//!
//! Field names follow the Portuguese wire contract used by the game client
//! (`nome`, `classe`, `atributos`). The class catalog itself lives in the
//! client's static data tables; the engine only needs the tag.

use serde::{Deserialize, Serialize};

/// A player character as submitted with each narrative request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub nome: String,
    pub classe: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub atributos: Attributes,
}

fn default_level() -> u32 {
    1
}

/// Core attribute block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub forca: i32,
    #[serde(default)]
    pub inteligencia: i32,
    #[serde(default)]
    pub agilidade: i32,
    #[serde(default)]
    pub vitalidade: i32,
    #[serde(default)]
    pub sabedoria: i32,
}
