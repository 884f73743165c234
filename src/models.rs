use serde::{Deserialize, Serialize};

/// Shown in place of a species description that could not be fetched.
pub const NO_DESCRIPTION: &str = "No description available.";

/// A single Pokémon as returned by a successful lookup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PokemonRecord {
    pub name: String,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub description: String,
    pub sprite: Option<String>,
}

impl PokemonRecord {
    /// Multi-line text block rendered in the result area.
    pub fn summary(&self) -> String {
        format!(
            "Name: {}\nHeight: {}\nWeight: {}\nDescription: {}",
            self.name, self.height, self.weight, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_fields_in_display_order() {
        let p = PokemonRecord {
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            description: "A mouse-type Pokémon.".into(),
            sprite: None,
        };
        assert_eq!(
            p.summary(),
            "Name: pikachu\nHeight: 4\nWeight: 60\nDescription: A mouse-type Pokémon."
        );
    }
}
