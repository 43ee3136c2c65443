//! Pokemon DTOs for the PokeAPI
//!
//! Only the fields the explorer displays or uses for catching are decoded;
//! everything else in the payload is ignored.

use serde::Deserialize;

use super::NamedResource;

/// Response body for `GET /pokemon/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    /// Null for a handful of API entries
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_deserialize() {
        let json = r#"{
            "name": "pidgey",
            "height": 3,
            "weight": 18,
            "base_experience": 50,
            "stats": [
                {"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 56, "effort": 1, "stat": {"name": "speed", "url": ""}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "normal", "url": ""}},
                {"slot": 2, "type": {"name": "flying", "url": ""}}
            ]
        }"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();

        assert_eq!(pokemon.name, "pidgey");
        assert_eq!(pokemon.base_experience, Some(50));
        assert_eq!(pokemon.stats[1].stat.name, "speed");
        assert_eq!(pokemon.types[1].kind.name, "flying");
    }

    #[test]
    fn test_pokemon_null_base_experience() {
        let json = r#"{"name": "glitch", "base_experience": null}"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();

        assert_eq!(pokemon.base_experience, None);
        assert!(pokemon.stats.is_empty());
    }
}
