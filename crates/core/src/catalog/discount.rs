use rust_decimal::{Decimal, RoundingStrategy};

/// Number of leading items in the fetch response that receive the promotion.
pub const PROMOTED_ITEM_COUNT: usize = 4;

/// Percentage taken off promoted items.
pub const PROMOTION_PERCENT: u32 = 20;

pub fn discount_for_position(position: usize) -> u32 {
    if position < PROMOTED_ITEM_COUNT {
        PROMOTION_PERCENT
    } else {
        0
    }
}

/// `price * (1 - discount / 100)` rounded half away from zero to cents.
pub fn discounted_price(price: Decimal, discount: u32) -> Decimal {
    let factor = Decimal::ONE - Decimal::from(discount) / Decimal::ONE_HUNDRED;
    (price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
