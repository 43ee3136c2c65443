//! Client Module
//!
//! Network access to the catalog API, memoized through the response cache.

mod pokeapi;

pub use pokeapi::PokeApiClient;
