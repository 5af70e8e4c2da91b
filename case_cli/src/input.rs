//! Parsing of player input lines.

use case_engine::Command;
use case_rules::{ActionId, AddressParseError, LocationAddress};
use thiserror::Error;

/// Help text listing every input.
pub const HELP: &str = "\
Commands:
  visit <number> <district>   go to a location, e.g. `visit 28 WC`
  act <id>                    choose a presented action or sub-choice
  locations                   list the directory with visited/locked markers
  progress                    show clues found and leads followed
  intro                       show the introduction again
  credits                     show the credits
  questions                   show the case questions
  score                       solve the case and see your score
  help                        show this help
  quit                        leave the game";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Session(Command),
    Locations,
    Progress,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Address(#[from] AddressParseError),
}

/// Parse a trimmed input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "visit" | "go" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("visit"));
            }
            Input::Session(Command::Visit(rest.parse::<LocationAddress>()?))
        }
        "act" | "choose" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("act"));
            }
            Input::Session(Command::ChooseAction(ActionId::new(rest)))
        }
        "score" | "solve" => Input::Session(Command::RequestScore),
        "intro" => Input::Session(Command::RequestIntro),
        "credits" => Input::Session(Command::RequestCredits),
        "questions" => Input::Session(Command::RequestQuestions),
        "locations" | "ls" => Input::Locations,
        "progress" => Input::Progress,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(Some(input))
}
