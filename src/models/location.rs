//! Location DTOs for the PokeAPI
//!
//! Defines the shape of location-area list pages and single location areas.

use serde::Deserialize;

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area/`
///
/// `next` and `previous` are absolute URLs, or null at either end of the list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationAreaPage {
    #[serde(default)]
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Response body for `GET /location-area/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of the creatures that can be encountered here, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area/?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;
        let page: LocationAreaPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.count, 1089);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results[1].name, "eterna-city-area");
    }

    #[test]
    fn test_area_pokemon_names() {
        let json = r#"{
            "name": "pastoria-city-area",
            "id": 7,
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": ""}, "version_details": []},
                {"pokemon": {"name": "magikarp", "url": ""}, "version_details": []}
            ]
        }"#;
        let area: LocationArea = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = area.pokemon_names().collect();
        assert_eq!(names, vec!["tentacool", "magikarp"]);
    }
}
