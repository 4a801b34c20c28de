use alloy_primitives::U256;
use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::types::{ChartData, ChartSwap};
use crate::models::{SwapLeg, SwapMethod, SwapPreview};
use crate::utils::{from_wei, round_percentage, to_wei, u256_to_bigint};

/// Legs charted individually before the rest fold into "others".
pub const INDIVIDUAL_LEGS: usize = 2;

/// Empty, invalid chart shown before any preview arrives.
pub fn reset_composition() -> ChartData {
    ChartData::default()
}

/// Build the chart for a trade routed over `legs`.
///
/// `legs` must already be sorted largest first; they are charted in the
/// given order. `trade_amount` is the user-fixed side in display units and
/// `total_opposite` is the engine's total for the other side in smallest
/// units.
pub fn derive_composition(
    method: SwapMethod,
    legs: &[SwapLeg],
    trade_amount: &BigDecimal,
    total_opposite: U256,
    valid_swap: bool,
) -> ChartData {
    if !valid_swap {
        return reset_composition();
    }

    let total = BigDecimal::from(to_wei(trade_amount));
    let hundred = BigDecimal::from(100);

    let mut swaps = Vec::with_capacity(INDIVIDUAL_LEGS + 1);
    let mut others = BigDecimal::zero();
    let mut total_percentage = BigDecimal::zero();

    for (index, leg) in legs.iter().enumerate() {
        let amount = BigDecimal::from(u256_to_bigint(leg.side_amount(method)));
        let percentage = if total.is_zero() {
            round_percentage(&BigDecimal::zero())
        } else {
            round_percentage(&(amount / &total * &hundred))
        };

        total_percentage += &percentage;
        if index < INDIVIDUAL_LEGS {
            swaps.push(ChartSwap::pool(leg.pool.clone(), percentage));
        } else {
            others += percentage;
        }
    }

    if others > BigDecimal::zero() {
        swaps.push(ChartSwap::others(others));
    }

    if total_percentage != hundred {
        tracing::warn!(
            total = %total_percentage,
            legs = legs.len(),
            %method,
            "[CHART] total percentage unexpected value"
        );
    }

    let (input_price_value, output_price_value) = match method {
        SwapMethod::ExactIn => (trade_amount.clone(), from_wei(total_opposite)),
        SwapMethod::ExactOut => (from_wei(total_opposite), trade_amount.clone()),
    };

    ChartData {
        valid_swap: true,
        swaps,
        input_price_value,
        output_price_value,
    }
}

/// Chart for a preview, using the amounts its method fixes.
pub fn derive_from_preview(preview: &SwapPreview) -> ChartData {
    match preview {
        SwapPreview::ExactIn(p) => derive_composition(
            SwapMethod::ExactIn,
            &p.swaps,
            &p.input_amount,
            p.total_output,
            p.valid_swap,
        ),
        SwapPreview::ExactOut(p) => derive_composition(
            SwapMethod::ExactOut,
            &p.swaps,
            &p.output_amount,
            p.total_input,
            p.valid_swap,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExactAmountInPreview, ExactAmountOutPreview};
    use std::str::FromStr;

    const WEI: u128 = 1_000_000_000_000_000_000;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn leg(pool: &str, amount_in: u128, amount_out: u128) -> SwapLeg {
        SwapLeg::new(pool, U256::from(amount_in), U256::from(amount_out))
    }

    #[test]
    fn invalid_swap_yields_sentinel() {
        let legs = vec![leg("0xa", 5 * WEI, 1)];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("5"),
            U256::from(42u64),
            false,
        );
        assert_eq!(chart, reset_composition());
        assert!(!chart.valid_swap);
        assert!(chart.swaps.is_empty());
        assert!(chart.input_price_value.is_zero());
        assert!(chart.output_price_value.is_zero());
    }

    #[test]
    fn three_legs_fold_the_smallest_into_others() {
        let legs = vec![
            leg("0xa", 5 * WEI, 0),
            leg("0xb", 3 * WEI, 0),
            leg("0xc", 2 * WEI, 0),
        ];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("10"),
            U256::from(20 * WEI),
            true,
        );

        assert!(chart.valid_swap);
        assert_eq!(chart.swaps.len(), 3);
        assert_eq!(chart.swaps[0], ChartSwap::pool("0xa", dec("50")));
        assert_eq!(chart.swaps[1], ChartSwap::pool("0xb", dec("30")));
        assert_eq!(chart.swaps[2], ChartSwap::others(dec("20")));
        let sum: BigDecimal = chart.swaps.iter().map(|s| s.percentage.clone()).sum();
        assert_eq!(sum, dec("100"));
        assert_eq!(chart.input_price_value, dec("10"));
        assert_eq!(chart.output_price_value, dec("20"));
    }

    #[test]
    fn many_small_legs_share_one_others_bucket() {
        let legs = vec![
            leg("0xa", 40, 0),
            leg("0xb", 30, 0),
            leg("0xc", 15, 0),
            leg("0xd", 10, 0),
            leg("0xe", 5, 0),
        ];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("0.0000000000000001"),
            U256::ZERO,
            true,
        );
        assert_eq!(chart.swaps.len(), 3);
        assert_eq!(chart.swaps[2], ChartSwap::others(dec("30")));
    }

    #[test]
    fn single_leg_has_no_others_entry() {
        let legs = vec![leg("0xa", 7 * WEI, 0)];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("7"),
            U256::from(WEI),
            true,
        );
        assert_eq!(chart.swaps, vec![ChartSwap::pool("0xa", dec("100"))]);
    }

    #[test]
    fn percentages_round_half_to_even() {
        let legs = vec![leg("0xa", 33_335, 0), leg("0xb", 33_325, 0)];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("0.0000000000001"),
            U256::ZERO,
            true,
        );
        assert_eq!(chart.swaps[0].percentage, dec("33.34"));
        assert_eq!(chart.swaps[1].percentage, dec("33.32"));
    }

    #[test]
    fn mismatched_total_does_not_alter_output() {
        let legs = vec![leg("0xa", WEI, 0), leg("0xb", WEI, 0)];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("4"),
            U256::from(WEI),
            true,
        );
        assert!(chart.valid_swap);
        assert_eq!(chart.swaps.len(), 2);
        assert_eq!(chart.swaps[0].percentage, dec("25"));
        assert_eq!(chart.swaps[1].percentage, dec("25"));
    }

    /// Runs `f` with a subscriber that writes formatted events into a buffer.
    fn captured_logs(f: impl FnOnce()) -> String {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn total_mismatch_is_reported() {
        let logs = captured_logs(|| {
            let legs = vec![leg("0xa", WEI, 0), leg("0xb", WEI, 0)];
            derive_composition(SwapMethod::ExactIn, &legs, &dec("4"), U256::from(WEI), true);
        });
        assert!(logs.contains("[CHART] total percentage unexpected value"), "{logs}");
        assert!(logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn full_total_is_silent() {
        let logs = captured_logs(|| {
            let legs = vec![
                leg("0xa", 5 * WEI, 0),
                leg("0xb", 3 * WEI, 0),
                leg("0xc", 2 * WEI, 0),
            ];
            derive_composition(SwapMethod::ExactIn, &legs, &dec("10"), U256::from(WEI), true);
        });
        assert!(!logs.contains("total percentage unexpected value"), "{logs}");
    }

    #[test]
    fn zero_trade_amount_charts_zero_percent() {
        let legs = vec![leg("0xa", WEI, 0), leg("0xb", WEI, 0), leg("0xc", WEI, 0)];
        let chart = derive_composition(
            SwapMethod::ExactIn,
            &legs,
            &dec("0"),
            U256::ZERO,
            true,
        );
        assert_eq!(chart.swaps.len(), 2);
        assert!(chart.swaps.iter().all(|s| s.percentage.is_zero()));
        assert!(chart.swaps.iter().all(|s| s.percentage.to_plain_string() == "0.00"));
    }

    #[test]
    fn exact_out_uses_output_side_and_swaps_price_values() {
        let preview = SwapPreview::ExactOut(ExactAmountOutPreview {
            output_amount: dec("4"),
            total_input: U256::from(6 * WEI),
            swaps: vec![leg("0xa", 4 * WEI, 3 * WEI), leg("0xb", 2 * WEI, WEI)],
            effective_price: dec("1.5"),
            spot_price: dec("1.4"),
            expected_slippage: dec("0.07"),
            valid_swap: true,
        });
        let chart = derive_from_preview(&preview);
        assert_eq!(chart.swaps[0].percentage, dec("75"));
        assert_eq!(chart.swaps[1].percentage, dec("25"));
        assert_eq!(chart.input_price_value, dec("6"));
        assert_eq!(chart.output_price_value, dec("4"));
    }

    #[test]
    fn exact_in_preview_respects_validity_flag() {
        let preview = SwapPreview::ExactIn(ExactAmountInPreview {
            input_amount: dec("1"),
            total_output: U256::from(WEI),
            swaps: vec![leg("0xa", WEI, WEI)],
            effective_price: dec("1"),
            spot_price: dec("1"),
            expected_slippage: dec("0"),
            valid_swap: false,
        });
        assert_eq!(derive_from_preview(&preview), reset_composition());
    }
}
