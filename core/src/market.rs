//! Market engine — per-crop unit prices drifting on a bounded random
//! walk, throttled to a minimum tick interval.
//!
//! Each crop draws its step independently from [-v/2, v/2] where v is
//! the crop's declared volatility. Prices round to one decimal and
//! never fall below PRICE_FLOOR.

use crate::{
    config::{SimConfig, MARKET_MIN_INTERVAL, PRICE_FLOOR},
    rng::FarmRng,
    snapshot::round1,
    types::{Crop, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropMarket {
    pub price: f64,
    pub last_adjusted_tick: Tick,
}

pub type Market = BTreeMap<Crop, CropMarket>;

pub fn initial_market(config: &SimConfig) -> Market {
    Crop::ALL
        .iter()
        .map(|&crop| {
            (
                crop,
                CropMarket {
                    price: config.initial_price(crop),
                    last_adjusted_tick: 0,
                },
            )
        })
        .collect()
}

/// Drift every crop's price for `tick`. Pure: returns the input
/// unchanged while the throttle window is open.
///
/// All crops share one `last_adjusted_tick` cadence: the throttle is
/// checked against the earliest entry so a partial update can never
/// split the cadence.
pub fn adjust_market(market: &Market, tick: Tick, rng: &mut FarmRng) -> Market {
    let last = market
        .values()
        .map(|m| m.last_adjusted_tick)
        .min()
        .unwrap_or(0);
    if tick.saturating_sub(last) < MARKET_MIN_INTERVAL {
        return market.clone();
    }

    let mut next = Market::new();
    for (&crop, entry) in market {
        let half = crop.volatility() / 2.0;
        let delta = rng.uniform(-half, half);
        let price = round1(entry.price + delta).max(PRICE_FLOOR);
        log::trace!(
            "tick={tick} market: {} {:.1} -> {:.1}",
            crop.name(),
            entry.price,
            price
        );
        next.insert(
            crop,
            CropMarket {
                price,
                last_adjusted_tick: tick,
            },
        );
    }
    next
}
