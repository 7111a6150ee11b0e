//! Weather generator — cyclical condition changes and the per-tick
//! growth/moisture profile derived from them.
//!
//! Weather only moves on WEATHER_UPDATE_INTERVAL boundaries; every
//! other tick returns the input unchanged. The condition walks a fixed
//! cycle, temperature and humidity are redrawn inside per-condition
//! bands, and rainfall chance is a pure function of the condition.

use crate::{config::WEATHER_UPDATE_INTERVAL, rng::FarmRng, snapshot::clamp_pct, types::Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Overcast,
    Rain,
}

impl WeatherCondition {
    /// Next entry in the fixed cycle (wrapping).
    pub fn next(&self) -> Self {
        match self {
            Self::Sunny => Self::PartlyCloudy,
            Self::PartlyCloudy => Self::Overcast,
            Self::Overcast => Self::Rain,
            Self::Rain => Self::Sunny,
        }
    }

    pub fn rainfall_chance(&self) -> f64 {
        match self {
            Self::Rain => 80.0,
            Self::Overcast => 45.0,
            Self::PartlyCloudy => 25.0,
            Self::Sunny => 10.0,
        }
    }

    /// Redraw bands: (temperature °C, relative humidity %).
    fn redraw_bands(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            Self::Sunny => ((24.0, 34.0), (30.0, 50.0)),
            Self::PartlyCloudy => ((20.0, 30.0), (40.0, 60.0)),
            Self::Overcast => ((16.0, 26.0), (55.0, 75.0)),
            Self::Rain => ((14.0, 24.0), (70.0, 95.0)),
        }
    }

    /// Per-tick field update inputs for this condition.
    pub fn profile(&self) -> WeatherProfile {
        match self {
            Self::Rain => WeatherProfile { growth: 12.0, moisture_delta: 7.0 },
            Self::Overcast => WeatherProfile { growth: 9.0, moisture_delta: 4.0 },
            Self::PartlyCloudy => WeatherProfile { growth: 7.0, moisture_delta: 2.0 },
            Self::Sunny => WeatherProfile { growth: 5.0, moisture_delta: -2.0 },
        }
    }
}

/// (growth, moistureDelta) pair applied to every field on a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    pub growth: f64,
    pub moisture_delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall_chance: f64,
}

impl Weather {
    pub fn initial() -> Self {
        Self {
            condition: WeatherCondition::Sunny,
            temperature: 28.0,
            humidity: 40.0,
            rainfall_chance: WeatherCondition::Sunny.rainfall_chance(),
        }
    }
}

/// Advance the weather for `tick`. Pure: off-interval ticks return the
/// input unchanged.
pub fn advance_weather(current: &Weather, tick: Tick, rng: &mut FarmRng) -> Weather {
    if tick == 0 || tick % WEATHER_UPDATE_INTERVAL != 0 {
        return current.clone();
    }

    let condition = current.condition.next();
    let ((t_lo, t_hi), (h_lo, h_hi)) = condition.redraw_bands();
    let next = Weather {
        condition,
        temperature: rng.uniform(t_lo, t_hi),
        humidity: clamp_pct(rng.uniform(h_lo, h_hi)),
        rainfall_chance: condition.rainfall_chance(),
    };

    log::debug!(
        "tick={tick} weather: {:?} -> {:?} temp={:.1} humidity={:.0} rain%={:.0}",
        current.condition,
        next.condition,
        next.temperature,
        next.humidity,
        next.rainfall_chance
    );

    next
}
