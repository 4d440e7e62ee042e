//! Interactive calculator session.
//!
//! Reads one command per line. Numbers are calculated in the active unit,
//! `loads` / `pounds` switch the unit, and unparseable or non-positive
//! quantities are ignored without output, leaving the last result in place.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::request::{Calculation, CalculationRequest, Unit};
use crate::ui::Renderer;

const HELP: &str = "\
Commands:
  <number>          calculate machines for this quantity
  loads | pounds    switch the input unit
  catalog           list available machines
  help              show this message
  quit | exit       leave the calculator";

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Calculate(String),
    SwitchUnit(Unit),
    Catalog,
    Help,
    Quit,
    Blank,
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Command::Blank,
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "?" => Command::Help,
            "catalog" | "machines" => Command::Catalog,
            other => match other.parse::<Unit>() {
                Ok(unit) => Command::SwitchUnit(unit),
                Err(_) => Command::Calculate(trimmed.to_string()),
            },
        }
    }
}

/// The state of one interactive run: the selected unit and the last result.
pub struct Session<'a> {
    catalog: &'a Catalog,
    renderer: Renderer,
    unit: Unit,
    last: Option<Calculation<'a>>,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, renderer: Renderer, unit: Unit) -> Self {
        Self {
            catalog,
            renderer,
            unit,
            last: None,
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The most recent successful calculation, if any.
    pub fn last(&self) -> Option<&Calculation<'a>> {
        self.last.as_ref()
    }

    /// Handles one line. Returns `false` when the session should end.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        match Command::parse(line) {
            Command::Blank => {}
            Command::Quit => return Ok(false),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Catalog => self.renderer.catalog(out, self.catalog, self.unit)?,
            Command::SwitchUnit(unit) => {
                self.unit = unit;
                writeln!(out, "Entering quantities in {unit}")?;
            }
            Command::Calculate(input) => {
                match CalculationRequest::new(input, self.unit).evaluate(self.catalog) {
                    Ok(calc) => {
                        self.renderer.calculation(out, &calc)?;
                        self.last = Some(calc);
                    }
                    Err(e) => debug!(error = %e, "ignoring input"),
                }
            }
        }
        Ok(true)
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "Laundry cost calculator. Entering quantities in {}; type `help` for commands.",
            self.unit
        )?;
        for line in input.lines() {
            let line = line?;
            if !self.handle_line(&line, out)? {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputFormat;
    use rust_decimal_macros::dec;

    fn session() -> Session<'static> {
        Session::new(
            Catalog::standard(),
            Renderer::plain(OutputFormat::Text, "$"),
            Unit::Loads,
        )
    }

    #[test]
    fn command_parsing() {
        assert_eq!(Command::parse("  "), Command::Blank);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse("pounds"), Command::SwitchUnit(Unit::Pounds));
        assert_eq!(Command::parse("catalog"), Command::Catalog);
        assert_eq!(Command::parse(" 6 "), Command::Calculate("6".into()));
    }

    #[test]
    fn calculates_in_active_unit() {
        let mut session = session();
        let mut out = Vec::new();
        assert!(session.handle_line("pounds", &mut out).unwrap());
        assert!(session.handle_line("16", &mut out).unwrap());
        assert_eq!(session.unit(), Unit::Pounds);

        let last = session.last().unwrap();
        assert_eq!(last.loads, dec!(2));
        assert_eq!(last.allocation.total_cost(), dec!(4.00));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total Cost $4.00"));
    }

    #[test]
    fn invalid_input_is_a_silent_no_op() {
        let mut session = session();
        let mut out = Vec::new();
        session.handle_line("6", &mut out).unwrap();
        let before = out.len();

        for bad in ["abc", "0", "-4"] {
            assert!(session.handle_line(bad, &mut out).unwrap());
        }
        assert_eq!(out.len(), before);
        assert_eq!(session.last().unwrap().allocation.total_cost(), dec!(10.50));
    }

    #[test]
    fn run_stops_at_quit() {
        let mut session = session();
        let mut out = Vec::new();
        let input = "5\nquit\n2\n".as_bytes();
        session.run(input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Total Cost").count(), 1);
        assert!(text.contains("Total Cost $9.00"));
    }

    #[test]
    fn run_ends_at_eof() {
        let mut session = session();
        let mut out = Vec::new();
        session.run("help\ncatalog\n".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Commands:"));
        assert!(text.contains("Extra Large Washer"));
        assert!(session.last().is_none());
    }
}
