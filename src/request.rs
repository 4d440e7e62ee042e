//! Turning what the user typed into an allocation.
//!
//! A [`CalculationRequest`] carries the raw quantity text and the unit it was
//! entered in. [`CalculationRequest::evaluate`] validates it, converts pounds
//! to loads and runs the allocator, returning a [`Calculation`].

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocator::{AllocationResult, allocate};
use crate::catalog::Catalog;
use crate::error::{LaundryError, Result};

/// Pounds of laundry in one load.
pub const POUNDS_PER_LOAD: Decimal = dec!(8);

/// Smallest positive quantity a `Decimal` can hold (`1e-28`). Positive inputs
/// finer than this are raised to it, so they still get one machine.
pub const SMALLEST_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

/// The unit a quantity is entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Number of loads, used as-is.
    #[default]
    Loads,
    /// Weight in pounds, divided by eight to get loads.
    Pounds,
}

impl Unit {
    /// Converts `value` in this unit to loads. A positive `value` never
    /// converts to zero loads.
    pub fn to_loads(self, value: Decimal) -> Decimal {
        let loads = match self {
            Unit::Loads => value,
            Unit::Pounds => value / POUNDS_PER_LOAD,
        };
        if loads.is_zero() && value > Decimal::ZERO {
            SMALLEST_QUANTITY
        } else {
            loads
        }
    }

    /// Converts a number of loads back into this unit, for display.
    pub fn from_loads(self, loads: Decimal) -> Decimal {
        match self {
            Unit::Loads => loads,
            Unit::Pounds => loads * POUNDS_PER_LOAD,
        }
    }

    /// Short label for a quantity of this unit.
    pub fn label(self, value: Decimal) -> &'static str {
        match self {
            Unit::Loads if value == Decimal::ONE => "load",
            Unit::Loads => "loads",
            Unit::Pounds => "lb",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Loads => write!(f, "loads"),
            Unit::Pounds => write!(f, "pounds"),
        }
    }
}

impl FromStr for Unit {
    type Err = LaundryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "loads" | "load" => Ok(Unit::Loads),
            "pounds" | "pound" | "lb" | "lbs" => Ok(Unit::Pounds),
            _ => Err(LaundryError::UnknownUnit(s.to_string())),
        }
    }
}

/// Parses a strictly positive decimal quantity.
///
/// Accepts plain (`12.5`) and scientific (`1.25e1`) notation; anything else,
/// zero, and negatives are [`LaundryError::InvalidQuantity`]. Positive numbers
/// below [`SMALLEST_QUANTITY`] are raised to it; numbers above `Decimal::MAX`
/// are [`LaundryError::Overflow`].
pub fn parse_quantity(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let invalid = || LaundryError::InvalidQuantity(input.to_string());
    // Only consulted for magnitudes `Decimal` cannot represent.
    let approx = trimmed.parse::<f64>().ok().filter(|x| !x.is_nan());

    let value = match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(value) => value,
        Err(_) => match approx {
            Some(x) if x > 0.0 && x < 1.0 => Decimal::ZERO,
            Some(x) if x >= 1.0 && trimmed.chars().any(|c| c.is_ascii_digit()) => {
                return Err(LaundryError::Overflow);
            }
            _ => return Err(invalid()),
        },
    };

    if value > Decimal::ZERO {
        Ok(value)
    } else if value.is_zero() && approx.is_some_and(|x| x > 0.0) {
        Ok(SMALLEST_QUANTITY)
    } else {
        Err(invalid())
    }
}

/// One "calculate" press: the text as entered and the active unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    pub input: String,
    pub unit: Unit,
}

impl CalculationRequest {
    pub fn new(input: impl Into<String>, unit: Unit) -> Self {
        Self {
            input: input.into(),
            unit,
        }
    }

    /// Validates the input and allocates machines from `catalog`.
    pub fn evaluate<'a>(&self, catalog: &'a Catalog) -> Result<Calculation<'a>> {
        let requested = parse_quantity(&self.input)?;
        let loads = self.unit.to_loads(requested);
        debug!(%requested, unit = %self.unit, %loads, "evaluating request");
        let allocation = allocate(loads, catalog)?;
        Ok(Calculation {
            unit: self.unit,
            requested,
            loads,
            allocation,
        })
    }
}

/// The response to a [`CalculationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calculation<'a> {
    pub unit: Unit,
    /// Quantity as entered, in `unit`.
    pub requested: Decimal,
    /// Quantity converted to loads.
    pub loads: Decimal,
    pub allocation: AllocationResult<'a>,
}
