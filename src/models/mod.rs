//! PokeAPI payload models
//!
//! Serde DTOs for the JSON bodies returned by the catalog API.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
