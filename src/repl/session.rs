//! REPL session state and command handlers.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catch::attempt_catch;
use crate::client::PokeApiClient;
use crate::error::Result;
use crate::models::LocationAreaPage;
use crate::pokedex::Pokedex;
use crate::repl::commands::{Command, Parsed, COMMANDS};
use crate::repl::{clean_input, Flow};

/// Cursor over the location-area pages.
#[derive(Debug, Default)]
struct Pagination {
    next: Option<String>,
    previous: Option<String>,
    /// Set once any page has been shown
    started: bool,
}

impl Pagination {
    fn advance(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

/// Everything one interactive session carries between commands.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    pokedex: Pokedex,
    pages: Pagination,
    rng: StdRng,
}

impl Session {
    /// Creates a session with an RNG seeded once from OS entropy.
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            pokedex: Pokedex::new(),
            pages: Pagination::default(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Cleans, parses, and runs one input line, writing output to `out`.
    pub async fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = clean_input(line);

        match Command::parse(&words) {
            Parsed::Empty => Ok(Flow::Continue),
            Parsed::Unknown(name) => {
                debug!(command = %name, "Unknown command");
                writeln!(out, "Unknown command")?;
                Ok(Flow::Continue)
            }
            Parsed::Usage(spec) => {
                writeln!(out, "Usage: {}", spec.usage)?;
                Ok(Flow::Continue)
            }
            Parsed::Run(command) => self.run(command, out).await,
        }
    }

    async fn run<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for spec in COMMANDS {
            writeln!(out, "{}: {}", spec.name, spec.description)?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = match (&self.pages.next, self.pages.started) {
            (Some(url), _) => Some(url.clone()),
            (None, false) => None,
            (None, true) => {
                writeln!(out, "No more locations available.")?;
                return Ok(());
            }
        };

        let page = self.client.location_areas(url.as_deref()).await?;
        self.show_page(&page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.pages.previous.clone() else {
            writeln!(out, "No previous locations available.")?;
            return Ok(());
        };

        let page = self.client.location_areas(Some(&url)).await?;
        self.show_page(&page, out)
    }

    fn show_page<W: Write>(&mut self, page: &LocationAreaPage, out: &mut W) -> Result<()> {
        for location in &page.results {
            writeln!(out, "{}", location.name)?;
        }
        self.pages.advance(page);
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let location = self.client.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        if self.pokedex.contains(name) {
            writeln!(out, "You already caught {}!", name)?;
            return Ok(());
        }

        let pokemon = self.client.pokemon(name).await?;
        if attempt_catch(&pokemon, &mut self.rng) {
            info!(pokemon = name, "Caught");
            writeln!(out, "{} was caught!", name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(name, pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "You have not caught that Pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Your Pokedex:")?;
        if self.pokedex.is_empty() {
            writeln!(out, "You have not caught any Pokemon yet.")?;
            return Ok(());
        }
        for pokemon in self.pokedex.iter() {
            writeln!(out, " - {}", pokemon.name)?;
        }
        Ok(())
    }
}
