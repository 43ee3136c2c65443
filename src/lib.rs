//! Pokedex - an interactive PokeAPI explorer
//!
//! Pages through location areas, explores them, and catches creatures into
//! an in-memory Pokedex. API responses are memoized in a time-bounded cache
//! swept by a background task.

pub mod cache;
pub mod catch;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use cache::TtlCache;
pub use client::PokeApiClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
pub use tasks::{spawn_sweep, spawn_sweep_task, SweepHandle};
