use bigdecimal::BigDecimal;
use serde::Serialize;

/// One segment of the trade-composition chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSwap {
    pub is_others: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
    /// Share of the fixed side, 0 to 100, two decimals.
    #[serde(with = "crate::utils::decimal_number")]
    pub percentage: BigDecimal,
}

impl ChartSwap {
    pub fn pool(pool_address: impl Into<String>, percentage: BigDecimal) -> Self {
        Self {
            is_others: false,
            pool_address: Some(pool_address.into()),
            percentage,
        }
    }

    pub fn others(percentage: BigDecimal) -> Self {
        Self {
            is_others: true,
            pool_address: None,
            percentage,
        }
    }
}

/// Chart-ready breakdown of how a trade is routed across pools.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub valid_swap: bool,
    /// Largest legs first; at most two pools plus one "others" bucket.
    pub swaps: Vec<ChartSwap>,
    #[serde(with = "crate::utils::plain_decimal")]
    pub input_price_value: BigDecimal,
    #[serde(with = "crate::utils::plain_decimal")]
    pub output_price_value: BigDecimal,
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            valid_swap: false,
            swaps: Vec::new(),
            input_price_value: BigDecimal::from(0),
            output_price_value: BigDecimal::from(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn chart_json_uses_numbers_and_plain_decimals() {
        let chart = ChartData {
            valid_swap: true,
            swaps: vec![
                ChartSwap::pool("0xa", dec("62.50")),
                ChartSwap::others(dec("37.50")),
            ],
            input_price_value: dec("0.000000000000000003"),
            output_price_value: dec("12.5"),
        };

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["swaps"][0]["percentage"], serde_json::json!(62.5));
        assert_eq!(json["swaps"][0]["poolAddress"], "0xa");
        assert_eq!(json["swaps"][1]["isOthers"], true);
        assert!(json["swaps"][1].get("poolAddress").is_none());
        assert_eq!(json["inputPriceValue"], "0.000000000000000003");
        assert_eq!(json["outputPriceValue"], "12.5");
    }
}
