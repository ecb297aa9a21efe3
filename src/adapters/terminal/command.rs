//! Parsing of tour command lines into session actions.

use crate::domain::error::AcademyError;
use crate::domain::quiz::OPTIONS_PER_QUESTION;
use crate::domain::risk::{parse_amount, CalculatorField};
use crate::domain::section::Section;
use crate::domain::session::Action;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourCommand {
    Help,
    Menu,
    Quit,
    Apply(Action),
}

pub const HELP: &str = "\
Commands:
  menu                 list sections and progress
  go <section>         open intro, patterns, risk, timeframes, entries or quiz
  start                begin the course from the introduction
  n, next              next item
  p, prev              previous item
  s, signal            reveal the pattern's trading signal
  select <n>           jump to scenario or strategy n
  a, b, c, d           choose a quiz answer
  submit               submit the chosen answer
  complete             mark the current module complete
  account|risk|entry|stop <value>
                       set a calculator input
  help                 show this list
  quit                 leave the tour
";

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<TourCommand>, AcademyError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_lowercase();
    let arg = words.next();
    if words.next().is_some() {
        return Err(AcademyError::invalid_input("command", "too many arguments"));
    }

    let command = match (head.as_str(), arg) {
        ("help" | "?" | "h", None) => TourCommand::Help,
        ("menu" | "m", None) => TourCommand::Menu,
        ("quit" | "q" | "exit", None) => TourCommand::Quit,
        ("start", None) => TourCommand::Apply(Action::Start),
        ("n" | "next", None) => TourCommand::Apply(Action::Next),
        ("p" | "prev" | "previous" | "back", None) => TourCommand::Apply(Action::Previous),
        ("s" | "signal" | "reveal", None) => TourCommand::Apply(Action::Reveal),
        ("submit", None) => TourCommand::Apply(Action::Submit),
        ("complete" | "done", None) => TourCommand::Apply(Action::Complete),
        ("go" | "open", Some(id)) => TourCommand::Apply(Action::Open(id.parse::<Section>()?)),
        ("select", Some(n)) => TourCommand::Apply(Action::Select(parse_position(n)?)),
        (word, None) if option_index(word).is_some() => {
            return Ok(option_index(word).map(|i| TourCommand::Apply(Action::Select(i))));
        }
        (name, Some(value)) if name.parse::<CalculatorField>().is_ok() => {
            let field: CalculatorField = name.parse()?;
            TourCommand::Apply(Action::SetInput(field, parse_amount(field, value)?))
        }
        _ => {
            return Err(AcademyError::invalid_input(
                "command",
                format!("'{}' not understood, type 'help' for the list", line.trim()),
            ));
        }
    };
    Ok(Some(command))
}

/// Maps a single letter `a`..`d` to an option index.
pub fn option_index(word: &str) -> Option<usize> {
    let mut chars = word.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_lowercase() {
        return None;
    }
    let index = (letter as u8 - b'a') as usize;
    (index < OPTIONS_PER_QUESTION).then_some(index)
}

pub fn option_letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

fn parse_position(raw: &str) -> Result<usize, AcademyError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(AcademyError::invalid_input(
            "select",
            format!("'{raw}' is not a position (use 1, 2, 3...)"),
        )),
    }
}
