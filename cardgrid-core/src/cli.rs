//! Command-line arguments and the interactive control commands.

use std::str::FromStr;

use clap::{ArgAction, Parser};

use crate::catalog::{Action, Facet};
use crate::error::CommandError;
use crate::render::OutputFormat;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "cardgrid",
    version,
    about = "Browse a card catalog from the terminal",
    long_about = "Loads a ';'-delimited card dataset, shows it 50 cards per page, and reads \
                  control commands (search, type, color, faction, reset, next, prev) from stdin.\n\n\
                  Examples:\n  cardgrid cards.csv\n  cardgrid https://example.com/cards.csv --type Creature --once\n  \
                  cardgrid cards.csv --output json < commands.txt"
)]
pub struct CliArgs {
    #[arg(value_name = "SOURCE", help = "Dataset file or http(s) URL.")]
    pub source: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help = "Path to config file (defaults to ~/.cardgrid/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        help_heading = "Input",
        help = "Field delimiter (default ';')."
    )]
    pub delimiter: Option<String>,

    #[arg(
        short = 'p',
        long = "page-size",
        value_name = "N",
        help_heading = "Output",
        help = "Cards per page (default 50)."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        help_heading = "Output",
        help = "Render format written to stdout."
    )]
    pub output: Option<OutputFormat>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(long, help = "Render the first page and exit without reading commands.")]
    pub once: bool,

    #[arg(short = 'q', long = "query", help_heading = "Filters", help = "Initial name search.")]
    pub query: Option<String>,

    #[arg(long = "type", value_name = "TYPE", help_heading = "Filters")]
    pub kind: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub color: Option<String>,

    #[arg(long, help_heading = "Filters")]
    pub faction: Option<String>,
}

impl CliArgs {
    /// Filter actions requested on the command line, applied before the
    /// first render.
    pub fn initial_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(query) = &self.query {
            actions.push(Action::set_query(query.as_str()));
        }
        let selections = [
            (Facet::Type, &self.kind),
            (Facet::Color, &self.color),
            (Facet::Faction, &self.faction),
        ];
        for (facet, value) in selections {
            if let Some(value) = value {
                actions.push(Action::select(facet, value.as_str()));
            }
        }
        actions
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    /// List every facet's options.
    Facets,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  search <text>      filter by name (empty clears)
  type <value>       pick a type (empty clears)
  color <value>      pick a color (empty clears)
  faction <value>    pick a faction (empty clears)
  reset              clear every filter
  next | prev        change page
  facets             list the options of each picker
  quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(CommandError::Empty);
        }

        let keyword = word.to_ascii_lowercase();
        if let Some(facet) = Facet::from_name(&keyword) {
            let action = if rest.is_empty() {
                Action::clear(facet)
            } else {
                Action::select(facet, rest)
            };
            return Ok(Command::Act(action));
        }

        let command = match keyword.as_str() {
            "search" | "find" => Command::Act(Action::set_query(rest)),
            "reset" => Command::Act(Action::Reset),
            "next" | "n" => Command::Act(Action::NextPage),
            "prev" | "previous" | "p" => Command::Act(Action::PreviousPage),
            "facets" => Command::Facets,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_owned())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn search_keeps_the_whole_remainder() {
        assert_eq!(
            parse("search  fire drake ").unwrap(),
            Command::Act(Action::set_query("fire drake"))
        );
        assert_eq!(parse("search").unwrap(), Command::Act(Action::set_query("")));
    }

    #[test]
    fn facet_commands_select_or_clear() {
        assert_eq!(
            parse("Color Red").unwrap(),
            Command::Act(Action::select(Facet::Color, "Red"))
        );
        assert_eq!(parse("faction").unwrap(), Command::Act(Action::clear(Facet::Faction)));
    }

    #[test]
    fn navigation_and_misc() {
        assert_eq!(parse("next").unwrap(), Command::Act(Action::NextPage));
        assert_eq!(parse("PREV").unwrap(), Command::Act(Action::PreviousPage));
        assert_eq!(parse("reset").unwrap(), Command::Act(Action::Reset));
        assert_eq!(parse("facets").unwrap(), Command::Facets);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_blank_and_unknown() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("jump 3"), Err(CommandError::Unknown("jump".into())));
    }

    #[test]
    fn cli_filters_become_actions() {
        let args = CliArgs::parse_from([
            "cardgrid",
            "cards.csv",
            "--query",
            "drake",
            "--type",
            "Creature",
            "--faction",
            "Wild",
        ]);
        assert_eq!(args.source.as_deref(), Some("cards.csv"));
        assert_eq!(
            args.initial_actions(),
            [
                Action::set_query("drake"),
                Action::select(Facet::Type, "Creature"),
                Action::select(Facet::Faction, "Wild"),
            ]
        );
    }

    #[test]
    fn parses_output_and_verbosity() {
        let args = CliArgs::parse_from(["cardgrid", "-o", "json", "-vv", "--once"]);
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert_eq!(args.verbose, 2);
        assert!(args.once);
    }
}
