//! Terminal output for calculations and the machine catalog.
//!
//! Uses the `console` crate for colored text. [`Renderer`] writes either a
//! human-readable breakdown or a JSON document, depending on
//! [`OutputFormat`].

use std::io::Write;

use clap::ValueEnum;
use console::Style;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::request::{Calculation, Unit};

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable breakdown.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Rounds a price to cents, keeping two decimal places even for whole amounts.
fn cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

#[derive(Debug, Serialize)]
struct LineReport<'a> {
    name: &'a str,
    capacity: Decimal,
    unit_cost: Decimal,
    quantity: u64,
    subtotal: Decimal,
}

#[derive(Debug, Serialize)]
struct CalculationReport<'a> {
    unit: Unit,
    requested: Decimal,
    loads: Decimal,
    machines: Vec<LineReport<'a>>,
    total_cost: Decimal,
    currency: &'a str,
}

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    name: &'a str,
    capacity: Decimal,
    unit_cost: Decimal,
}

/// Writes calculations and catalogs to a terminal (or any writer).
pub struct Renderer {
    format: OutputFormat,
    currency: String,
    // Machine names and headings.
    bold: Style,
    // Prices.
    green: Style,
    // Secondary details such as capacity.
    dim: Style,
}

impl Renderer {
    /// A renderer with colored text output.
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
            bold: Style::new().bold(),
            green: Style::new().green().bold(),
            dim: Style::new().dim(),
        }
    }

    /// A renderer that never emits escape codes.
    pub fn plain(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
            bold: Style::new(),
            green: Style::new(),
            dim: Style::new(),
        }
    }

    fn price(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency, cents(amount))
    }

    fn capacity(unit: Unit, capacity: Decimal) -> String {
        let value = unit.from_loads(capacity).normalize();
        format!("{value} {}", unit.label(value))
    }

    /// Prints the machine breakdown and total for `calc`.
    pub fn calculation(&self, out: &mut impl Write, calc: &Calculation<'_>) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.calculation_text(out, calc),
            OutputFormat::Json => self.calculation_json(out, calc),
        }
    }

    fn calculation_text(&self, out: &mut impl Write, calc: &Calculation<'_>) -> Result<()> {
        writeln!(out, "{}", self.bold.apply_to("Recommended Machines"))?;
        for line in calc.allocation.lines() {
            let name = format!("{:<20}", line.machine.name);
            let capacity = format!(
                "{:<12}",
                Self::capacity(calc.unit, line.machine.capacity)
            );
            writeln!(
                out,
                "  {} {} {:>8}  {}",
                self.bold.apply_to(name),
                self.dim.apply_to(capacity),
                self.price(line.machine.unit_cost),
                self.green.apply_to(format!("x{}", line.quantity)),
            )?;
        }
        writeln!(out, "{}", self.dim.apply_to("─".repeat(48)))?;
        writeln!(
            out,
            "{} {}",
            self.bold.apply_to("Total Cost"),
            self.green.apply_to(self.price(calc.allocation.total_cost()))
        )?;
        Ok(())
    }

    fn calculation_json(&self, out: &mut impl Write, calc: &Calculation<'_>) -> Result<()> {
        let report = CalculationReport {
            unit: calc.unit,
            requested: calc.requested,
            loads: calc.loads,
            machines: calc
                .allocation
                .lines()
                .iter()
                .map(|line| LineReport {
                    name: &line.machine.name,
                    capacity: line.machine.capacity,
                    unit_cost: cents(line.machine.unit_cost),
                    quantity: line.quantity,
                    subtotal: cents(line.cost()),
                })
                .collect(),
            total_cost: cents(calc.allocation.total_cost()),
            currency: &self.currency,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }

    /// Prints every machine in `catalog`, capacities shown in `unit`.
    pub fn catalog(&self, out: &mut impl Write, catalog: &Catalog, unit: Unit) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(out, "{}", self.bold.apply_to("Machines"))?;
                for machine in catalog.machines() {
                    let name = format!("{:<20}", machine.name);
                    let capacity = format!("{:<12}", Self::capacity(unit, machine.capacity));
                    writeln!(
                        out,
                        "  {} {} {:>8}",
                        self.bold.apply_to(name),
                        self.dim.apply_to(capacity),
                        self.price(machine.unit_cost),
                    )?;
                }
            }
            OutputFormat::Json => {
                let entries: Vec<CatalogEntry<'_>> = catalog
                    .machines()
                    .iter()
                    .map(|machine| CatalogEntry {
                        name: &machine.name,
                        capacity: unit.from_loads(machine.capacity),
                        unit_cost: cents(machine.unit_cost),
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::CalculationRequest;
    use rust_decimal_macros::dec;

    fn render(renderer: &Renderer, input: &str, unit: Unit) -> String {
        let calc = CalculationRequest::new(input, unit)
            .evaluate(Catalog::standard())
            .unwrap();
        let mut out = Vec::new();
        renderer.calculation(&mut out, &calc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cents_keeps_two_places() {
        assert_eq!(cents(dec!(4)).to_string(), "4.00");
        assert_eq!(cents(dec!(10.5)).to_string(), "10.50");
        assert_eq!(cents(dec!(2.50)).to_string(), "2.50");
    }

    #[test]
    fn text_breakdown_lists_lines_and_total() {
        let renderer = Renderer::plain(OutputFormat::Text, "$");
        let text = render(&renderer, "6", Unit::Loads);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Recommended Machines");
        assert!(lines[1].contains("Extra Large Washer"));
        assert!(lines[1].contains("4 loads"));
        assert!(lines[1].contains("$6.50"));
        assert!(lines[1].ends_with("x1"));
        assert!(lines[2].contains("Large Washer"));
        assert!(lines[2].contains("$4.00"));
        assert_eq!(*lines.last().unwrap(), "Total Cost $10.50");
    }

    #[test]
    fn text_capacity_in_pounds_mode() {
        let renderer = Renderer::plain(OutputFormat::Text, "$");
        let text = render(&renderer, "16", Unit::Pounds);
        assert!(text.contains("Large Washer"));
        assert!(text.contains("16 lb"));
        assert!(text.ends_with("Total Cost $4.00\n"));
    }

    #[test]
    fn json_report_has_totals_as_strings() {
        let renderer = Renderer::plain(OutputFormat::Json, "$");
        let text = render(&renderer, "5", Unit::Loads);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["unit"], "loads");
        assert_eq!(value["total_cost"], "9.00");
        assert_eq!(value["currency"], "$");
        assert_eq!(value["machines"][0]["name"], "Extra Large Washer");
        assert_eq!(value["machines"][1]["name"], "Standard Washer");
        assert_eq!(value["machines"][1]["subtotal"], "2.50");
    }

    #[test]
    fn catalog_json_converts_capacity() {
        let renderer = Renderer::plain(OutputFormat::Json, "$");
        let mut out = Vec::new();
        renderer
            .catalog(&mut out, Catalog::standard(), Unit::Pounds)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[2]["name"], "Extra Large Washer");
        assert_eq!(value[2]["capacity"], "32");
        assert_eq!(value[0]["unit_cost"], "2.50");
    }

    #[test]
    fn catalog_text_uses_currency_symbol() {
        let renderer = Renderer::plain(OutputFormat::Text, "€");
        let mut out = Vec::new();
        renderer
            .catalog(&mut out, Catalog::standard(), Unit::Loads)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Machines\n"));
        assert!(text.contains("1 load "));
        assert!(text.contains("€2.50"));
    }
}
