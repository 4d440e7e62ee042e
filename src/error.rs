use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaundryError {
    #[error("Invalid quantity: {0:?} (expected a number greater than zero)")]
    InvalidQuantity(String),

    #[error("Unknown unit: {0:?} (expected `loads` or `pounds`)")]
    UnknownUnit(String),

    #[error("Machine catalog is empty")]
    EmptyCatalog,

    #[error("Machine {name:?} has non-positive capacity {capacity}")]
    InvalidCapacity { name: String, capacity: Decimal },

    #[error("Machine {name:?} has non-positive unit cost {cost}")]
    InvalidUnitCost { name: String, cost: Decimal },

    #[error("Quantity is too large to allocate")]
    Overflow,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T, E = LaundryError> = std::result::Result<T, E>;
