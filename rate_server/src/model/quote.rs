//! Synthetic quotation helpers.
//!
//! Quotations move by a small random walk shared by the sell and buy side, so the
//! spread between them stays proportional to the price.

use rand::Rng;
use rate_common::Market;
use rate_common::rate::Quotation;

/// Lowest price a random walk may reach.
const MIN_PRICE: f64 = 0.01;

/// Apply `change` (a fraction, `0.01` is +1%) to `current_price`, clamped to a
/// minimum positive value.
pub fn next_price(current_price: f64, change: f64) -> f64 {
    (current_price * (1.0 + change)).max(MIN_PRICE)
}

/// Move both sides of `current` by the same change, sampled uniformly from `[-1%, +1%)`.
pub fn next_quotation(current: &Quotation) -> Quotation {
    let change: f64 = rand::rng().random_range(-0.01..0.01);
    let value_sell = next_price(current.value_sell, change);
    let value_buy = next_price(current.value_buy, change);
    Quotation {
        value_avg: Some((value_sell + value_buy) / 2.0),
        value_sell,
        value_buy,
    }
}

/// Starting quotation for `market`.
pub fn initial_quotation(market: Market) -> Quotation {
    let (value_sell, value_buy) = match market {
        Market::Blue => (1020.0, 1000.0),
        Market::Oficial => (880.0, 840.0),
        Market::BlueEuro => (1105.0, 1085.0),
        Market::OficialEuro => (950.0, 910.0),
    };
    Quotation {
        value_avg: Some((value_sell + value_buy) / 2.0),
        value_sell,
        value_buy,
    }
}
