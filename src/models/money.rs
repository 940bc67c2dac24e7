use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency value to two decimal places, ties away from zero.
/// Used both when amounts are entered and when they are displayed.
pub fn round_money(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
