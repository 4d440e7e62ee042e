//! Greedy machine allocation.
//!
//! [`allocate`] walks the catalog from the largest capacity to the smallest,
//! taking as many whole runs of each machine as fit into what is left. Any
//! leftover smaller than every usable capacity is covered by a single run of
//! the smallest machine. The result is a heuristic, not a proven minimum cost.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, MachineType};
use crate::error::{LaundryError, Result};

/// Run `quantity` units of `machine`. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationLine<'a> {
    pub machine: &'a MachineType,
    pub quantity: u64,
}

impl AllocationLine<'_> {
    /// `quantity × unit_cost`.
    pub fn cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.machine.unit_cost
    }

    /// `quantity × capacity`.
    pub fn loads(&self) -> Decimal {
        Decimal::from(self.quantity) * self.machine.capacity
    }
}

/// The machines recommended for one request, in selection order, and their
/// total price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult<'a> {
    lines: Vec<AllocationLine<'a>>,
    total_cost: Decimal,
}

impl<'a> AllocationResult<'a> {
    pub fn lines(&self) -> &[AllocationLine<'a>] {
        &self.lines
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Loads covered by the recommendation. Never less than what was asked for.
    pub fn covered_loads(&self) -> Decimal {
        self.lines.iter().map(AllocationLine::loads).sum()
    }

    /// Number of machine runs across all lines.
    pub fn machine_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// Covers `requested_loads` with runs of the machines in `catalog`.
///
/// Fails with [`LaundryError::InvalidQuantity`] unless `requested_loads` is
/// strictly positive, and with [`LaundryError::Overflow`] if the runs of any
/// one machine exceed `u64::MAX`. For the standard catalog that caps requests
/// at `4 × u64::MAX` loads.
pub fn allocate(requested_loads: Decimal, catalog: &Catalog) -> Result<AllocationResult<'_>> {
    if requested_loads <= Decimal::ZERO {
        return Err(LaundryError::InvalidQuantity(requested_loads.to_string()));
    }

    let sorted = catalog.by_capacity_desc();
    let mut remaining = requested_loads;
    let mut lines = Vec::new();
    let mut total_cost = Decimal::ZERO;

    for &machine in &sorted {
        if remaining <= Decimal::ZERO {
            continue;
        }

        let runs = remaining
            .checked_div(machine.capacity)
            .ok_or(LaundryError::Overflow)?
            .floor();
        if runs <= Decimal::ZERO {
            continue;
        }
        let quantity = runs.to_u64().ok_or(LaundryError::Overflow)?;

        remaining = runs
            .checked_mul(machine.capacity)
            .and_then(|covered| remaining.checked_sub(covered))
            .ok_or(LaundryError::Overflow)?;
        total_cost = runs
            .checked_mul(machine.unit_cost)
            .and_then(|cost| total_cost.checked_add(cost))
            .ok_or(LaundryError::Overflow)?;

        debug!(machine = %machine, quantity, %remaining, "selected machine");
        lines.push(AllocationLine { machine, quantity });
    }

    if remaining > Decimal::ZERO {
        let smallest = catalog.smallest().ok_or(LaundryError::EmptyCatalog)?;
        total_cost = total_cost
            .checked_add(smallest.unit_cost)
            .ok_or(LaundryError::Overflow)?;
        debug!(machine = %smallest, %remaining, "covering leftover with one smallest machine");
        lines.push(AllocationLine {
            machine: smallest,
            quantity: 1,
        });
    }

    Ok(AllocationResult { lines, total_cost })
}
