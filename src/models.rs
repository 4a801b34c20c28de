//! Shared data structures used throughout the application.

use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::{AppError, Result};

/// Which side of the trade the user fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapMethod {
    #[serde(rename = "swapExactIn")]
    ExactIn,
    #[serde(rename = "swapExactOut")]
    ExactOut,
}

impl SwapMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapMethod::ExactIn => "swapExactIn",
            SwapMethod::ExactOut => "swapExactOut",
        }
    }
}

impl fmt::Display for SwapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapMethod {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "swapExactIn" => Ok(SwapMethod::ExactIn),
            "swapExactOut" => Ok(SwapMethod::ExactOut),
            other => Err(AppError::UnknownSwapMethod(other.to_string())),
        }
    }
}

/// Amount field that currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Buy,
    Sell,
}

impl FromStr for InputFocus {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(InputFocus::Buy),
            "SELL" => Ok(InputFocus::Sell),
            _ => Err(AppError::UnknownInputFocus(s.to_string())),
        }
    }
}

/// One hop of a routed trade through a single pool.
///
/// Both amounts are in the token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapLeg {
    pub pool: String,
    #[serde(with = "u256_dec")]
    pub token_in_param: U256,
    #[serde(with = "u256_dec")]
    pub token_out_param: U256,
    #[serde(default, with = "opt_u256_dec", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<U256>,
}

impl SwapLeg {
    pub fn new(pool: impl Into<String>, token_in_param: U256, token_out_param: U256) -> Self {
        Self {
            pool: pool.into(),
            token_in_param,
            token_out_param,
            max_price: None,
        }
    }

    /// Amount this leg contributes on the side the method fixes.
    pub fn side_amount(&self, method: SwapMethod) -> U256 {
        match method {
            SwapMethod::ExactIn => self.token_in_param,
            SwapMethod::ExactOut => self.token_out_param,
        }
    }
}

/// Preview for a trade whose input amount is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactAmountInPreview {
    /// User-entered input amount, decimal units.
    pub input_amount: BigDecimal,
    /// Total output, smallest units.
    #[serde(with = "u256_dec")]
    pub total_output: U256,
    pub swaps: Vec<SwapLeg>,
    pub effective_price: BigDecimal,
    pub spot_price: BigDecimal,
    pub expected_slippage: BigDecimal,
    pub valid_swap: bool,
}

/// Preview for a trade whose output amount is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactAmountOutPreview {
    /// User-entered output amount, decimal units.
    pub output_amount: BigDecimal,
    /// Total input, smallest units.
    #[serde(with = "u256_dec")]
    pub total_input: U256,
    pub swaps: Vec<SwapLeg>,
    pub effective_price: BigDecimal,
    pub spot_price: BigDecimal,
    pub expected_slippage: BigDecimal,
    pub valid_swap: bool,
}

/// Pricing engine output, tagged by the method it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SwapPreview {
    #[serde(rename = "swapExactIn")]
    ExactIn(ExactAmountInPreview),
    #[serde(rename = "swapExactOut")]
    ExactOut(ExactAmountOutPreview),
}

impl SwapPreview {
    /// Read one preview serialized by the pricing engine.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn method(&self) -> SwapMethod {
        match self {
            SwapPreview::ExactIn(_) => SwapMethod::ExactIn,
            SwapPreview::ExactOut(_) => SwapMethod::ExactOut,
        }
    }

    pub fn swaps(&self) -> &[SwapLeg] {
        match self {
            SwapPreview::ExactIn(p) => &p.swaps,
            SwapPreview::ExactOut(p) => &p.swaps,
        }
    }

    pub fn effective_price(&self) -> &BigDecimal {
        match self {
            SwapPreview::ExactIn(p) => &p.effective_price,
            SwapPreview::ExactOut(p) => &p.effective_price,
        }
    }

    pub fn spot_price(&self) -> &BigDecimal {
        match self {
            SwapPreview::ExactIn(p) => &p.spot_price,
            SwapPreview::ExactOut(p) => &p.spot_price,
        }
    }

    pub fn expected_slippage(&self) -> &BigDecimal {
        match self {
            SwapPreview::ExactIn(p) => &p.expected_slippage,
            SwapPreview::ExactOut(p) => &p.expected_slippage,
        }
    }

    pub fn valid_swap(&self) -> bool {
        match self {
            SwapPreview::ExactIn(p) => p.valid_swap,
            SwapPreview::ExactOut(p) => p.valid_swap,
        }
    }
}

/// (De)serialize a `U256` as a plain decimal string.
pub mod u256_dec {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<U256>()
            .map_err(|e| D::Error::custom(format!("invalid amount {raw:?}: {e}")))
    }
}

pub mod opt_u256_dec {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            s.trim()
                .parse::<U256>()
                .map_err(|e| D::Error::custom(format!("invalid amount {s:?}: {e}")))
        })
        .transpose()
    }
}
