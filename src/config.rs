//! Configuration loader and application settings.

use std::path::PathBuf;

use crate::errors::{AppError, Result};

/// Initial values for a new swap form session.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Extra slippage tolerance pre-filled in the selector, percent.
    pub slippage_allowance: String,
    /// Selected preset cell of the slippage selector.
    pub slippage_cell: usize,
    /// Decimal precision shown for each token until metadata arrives.
    pub precision: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            slippage_allowance: "1.0".into(),
            slippage_cell: 3,
            precision: 2,
        }
    }
}

impl FormConfig {
    /// Load from `SWAP_FORM_*` environment variables, falling back to defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let slippage_allowance = std::env::var("SWAP_FORM_SLIPPAGE_ALLOWANCE")
            .unwrap_or(defaults.slippage_allowance);
        let slippage_cell = parse_var("SWAP_FORM_SLIPPAGE_CELL", defaults.slippage_cell)?;
        let precision = parse_var("SWAP_FORM_PRECISION", defaults.precision)?;

        Ok(Self {
            slippage_allowance,
            slippage_cell,
            precision,
        })
    }
}

/// Settings for the command-line driver.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// JSON file holding one preview from the pricing engine.
    pub preview_path: PathBuf,
    /// Amount the user typed on the fixed side, if any.
    pub input_amount: Option<String>,
}

impl DemoConfig {
    pub fn load() -> Result<Self> {
        let preview_path = std::env::var("PREVIEW_PATH")
            .map_err(|_| AppError::Config("Set PREVIEW_PATH to a preview JSON file".into()))?;
        let input_amount = std::env::var("INPUT_AMOUNT").ok();
        Ok(Self {
            preview_path: PathBuf::from(preview_path),
            input_amount,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{name} has invalid value {raw:?}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: usize = parse_var("SWAP_FORM_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn defaults_match_fresh_form() {
        let config = FormConfig::default();
        assert_eq!(config.slippage_allowance, "1.0");
        assert_eq!(config.slippage_cell, 3);
        assert_eq!(config.precision, 2);
    }
}
