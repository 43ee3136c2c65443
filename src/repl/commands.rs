//! Command registry and parsing.

/// Static description of one REPL command.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Displays a help message",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
    },
    CommandSpec {
        name: "map",
        usage: "map",
        description: "Display the next 20 map locations",
    },
    CommandSpec {
        name: "mapb",
        usage: "mapb",
        description: "Display the previous 20 map locations",
    },
    CommandSpec {
        name: "explore",
        usage: "explore <location-area>",
        description: "Display the pokemon in a given location",
    },
    CommandSpec {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Attempt to catch and store a given Pokemon in the Pokedex",
    },
    CommandSpec {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "Display info for a given caught Pokemon",
    },
    CommandSpec {
        name: "pokedex",
        usage: "pokedex",
        description: "Display your Pokedex",
    },
];

/// Looks up a command by name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// A fully parsed command with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

/// Result of parsing one cleaned input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    /// Blank line
    Empty,
    Run(Command),
    /// Known command with the wrong number of arguments
    Usage(&'static CommandSpec),
    Unknown(String),
}

impl Command {
    /// Parses cleaned words into a command.
    ///
    /// Commands without arguments ignore trailing words; commands that take
    /// a name require exactly one.
    pub fn parse(words: &[String]) -> Parsed {
        let Some((name, args)) = words.split_first() else {
            return Parsed::Empty;
        };
        let Some(spec) = find(name) else {
            return Parsed::Unknown(name.clone());
        };

        let single = || match args {
            [arg] => Some(arg.clone()),
            _ => None,
        };

        let command = match spec.name {
            "help" => Some(Command::Help),
            "exit" => Some(Command::Exit),
            "map" => Some(Command::Map),
            "mapb" => Some(Command::MapBack),
            "pokedex" => Some(Command::Pokedex),
            "explore" => single().map(Command::Explore),
            "catch" => single().map(Command::Catch),
            "inspect" => single().map(Command::Inspect),
            _ => None,
        };

        match command {
            Some(command) => Parsed::Run(command),
            None => Parsed::Usage(spec),
        }
    }
}
