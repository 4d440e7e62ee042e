//! Machine catalog: the washers a customer can choose from.
//!
//! A [`Catalog`] is validated once at construction and never mutated
//! afterwards. [`Catalog::standard`] is the process-wide catalog used by the
//! CLI; other catalogs can be built for tests.

use std::fmt;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::{LaundryError, Result};

/// A kind of washing machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineType {
    /// Display label.
    pub name: String,
    /// Loads processed by one run.
    pub capacity: Decimal,
    /// Price of one run.
    pub unit_cost: Decimal,
}

impl MachineType {
    pub fn new(name: impl Into<String>, capacity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            name: name.into(),
            capacity,
            unit_cost,
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} x {:.2})", self.name, self.capacity, self.unit_cost)
    }
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(vec![
        MachineType::new("Standard Washer", dec!(1), dec!(2.50)),
        MachineType::new("Large Washer", dec!(2), dec!(4.00)),
        MachineType::new("Extra Large Washer", dec!(4), dec!(6.50)),
    ])
    .expect("invalid standard catalog")
});

/// An ordered, non-empty list of machines with positive capacities and costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    machines: Vec<MachineType>,
}

impl Catalog {
    /// Validates and wraps `machines`, keeping their order.
    pub fn new(machines: Vec<MachineType>) -> Result<Self> {
        if machines.is_empty() {
            return Err(LaundryError::EmptyCatalog);
        }
        for machine in &machines {
            if machine.capacity <= Decimal::ZERO {
                return Err(LaundryError::InvalidCapacity {
                    name: machine.name.clone(),
                    capacity: machine.capacity,
                });
            }
            if machine.unit_cost <= Decimal::ZERO {
                return Err(LaundryError::InvalidUnitCost {
                    name: machine.name.clone(),
                    cost: machine.unit_cost,
                });
            }
        }
        Ok(Self { machines })
    }

    /// The built-in three-washer catalog.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn machines(&self) -> &[MachineType] {
        &self.machines
    }

    /// Machines ordered by capacity, largest first. Ties keep catalog order.
    pub fn by_capacity_desc(&self) -> Vec<&MachineType> {
        let mut sorted: Vec<&MachineType> = self.machines.iter().collect();
        sorted.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        sorted
    }

    /// The machine the allocator falls back to for leftovers: the last entry
    /// of [`Catalog::by_capacity_desc`]. `None` only for an empty catalog,
    /// which [`Catalog::new`] never builds.
    pub fn smallest(&self) -> Option<&MachineType> {
        self.by_capacity_desc().pop()
    }
}
