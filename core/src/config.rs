//! Fixed initial configuration for a simulation session.
//!
//! The engine is created once from a `SimConfig`; nothing in here
//! changes during a run. Defaults match the shipped campaign setup:
//! six plots, one unlocked mission, modest starting credits.

use crate::types::{Crop, MissionId, Tick};
use serde::{Deserialize, Serialize};

/// Weather advances every this many ticks.
pub const WEATHER_UPDATE_INTERVAL: Tick = 6;

/// Market prices may not adjust more often than this many ticks.
pub const MARKET_MIN_INTERVAL: Tick = 4;

/// Hard floor under every crop price.
pub const PRICE_FLOOR: f64 = 4.0;

/// The alert queue keeps at most this many entries (oldest evicted).
pub const ALERT_CAP: usize = 8;

/// The planner waters growing fields whose moisture sits below this.
pub const PLANNER_MOISTURE_THRESHOLD: f64 = 55.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub field_count: u32,
    pub starting_credits: f64,
    pub starting_water: f64,
    pub starting_soil_health: f64,
    pub starting_energy: f64,
    pub starting_research: f64,
    /// Soil moisture every plot starts with.
    pub starting_moisture: f64,
    /// Initial unit price per crop, in declared crop order.
    pub initial_prices: [f64; 3],
    pub first_unlocked_mission: MissionId,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_count: 6,
            starting_credits: 500.0,
            starting_water: 80.0,
            starting_soil_health: 70.0,
            starting_energy: 100.0,
            starting_research: 0.0,
            starting_moisture: 50.0,
            initial_prices: [12.0, 15.0, 18.0],
            first_unlocked_mission: "mission-01".to_string(),
        }
    }
}

impl SimConfig {
    pub fn initial_price(&self, crop: Crop) -> f64 {
        match crop {
            Crop::Wheat => self.initial_prices[0],
            Crop::Corn => self.initial_prices[1],
            Crop::Soy => self.initial_prices[2],
        }
    }
}
