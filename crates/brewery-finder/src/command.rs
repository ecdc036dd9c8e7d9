//! Parsing of the line-oriented commands read from stdin.
//!
//! Each command stands in for one page listener: the region form, the
//! brewery type select, or a city checkbox.

use core::str::FromStr;

use brewery_core::BreweryError;
use brewery_types::BreweryType;

/// Usage text shown by `help` and after an invalid command.
pub const HELP: &str = "\
commands:
  state <REGION>          search breweries in a US state (e.g. `state ohio`)
  type <TYPE>|all         filter by brewery type (micro, brewpub, regional, ...)
  city <NAME> on|off      show or hide a city from the current results
  show                    redraw the page
  help                    show this message
  quit                    exit";

/// A single user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search a region; an empty region clears the search.
    Region(String),
    /// Change the brewery type filter; `None` removes it.
    Type(Option<BreweryType>),
    /// Include or exclude a city.
    City {
        /// City name as listed.
        name: String,
        /// Whether the city's checkbox becomes ticked.
        included: bool,
    },
    /// Redraw without changing anything.
    Show,
    /// Print usage.
    Help,
    /// Leave the program.
    Quit,
}

impl FromStr for Command {
    type Err = BreweryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "state" | "region" => Ok(Self::Region(rest.to_owned())),
            "type" => parse_type(rest),
            "city" => parse_city(rest),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err(BreweryError::Command("empty command".to_owned())),
            other => Err(BreweryError::Command(format!("unknown command `{other}`"))),
        }
    }
}

fn parse_type(rest: &str) -> Result<Command, BreweryError> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        return Ok(Command::Type(None));
    }
    rest.parse::<BreweryType>()
        .map(|brewery_type| Command::Type(Some(brewery_type)))
        .map_err(|e| BreweryError::Command(e.to_string()))
}

fn parse_city(rest: &str) -> Result<Command, BreweryError> {
    let Some((name, switch)) = rest.rsplit_once(char::is_whitespace) else {
        return Err(BreweryError::Command(
            "usage: city <NAME> on|off".to_owned(),
        ));
    };

    let included = match switch.to_ascii_lowercase().as_str() {
        "on" => true,
        "off" => false,
        other => {
            return Err(BreweryError::Command(format!(
                "expected `on` or `off`, got `{other}`"
            )));
        }
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(BreweryError::Command("city name is empty".to_owned()));
    }

    Ok(Command::City {
        name: name.to_owned(),
        included,
    })
}
