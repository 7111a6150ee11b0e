//! Field state machine — one plot's lifecycle and numeric state.
//!
//! Lifecycle: fallow -> tilled -> growing -> ready -> fallow (cyclic).
//! Every transition is guarded; the engine checks the guard before
//! allocating a new snapshot so a refused action stays a true no-op.
//! `ready` fields do not change on tick — they wait for an explicit
//! harvest or reset.

use crate::{
    rng::FarmRng,
    snapshot::clamp_pct,
    types::{Crop, FieldId},
    weather::WeatherProfile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Growing fields below this moisture lose part of their growth gain.
const MOISTURE_STRESS_THRESHOLD: f64 = 35.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Fallow,
    Tilled,
    Growing,
    Ready,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: FieldId,
    pub status: FieldStatus,
    pub crop: Option<Crop>,
    pub growth: f64,
    pub soil_moisture: f64,
    pub last_worked_at: DateTime<Utc>,
}

impl Field {
    pub fn new(id: FieldId, soil_moisture: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: FieldStatus::Fallow,
            crop: None,
            growth: 0.0,
            soil_moisture,
            last_worked_at: created_at,
        }
    }

    // ── Guards ─────────────────────────────────────────────────

    pub fn can_till(&self) -> bool {
        self.status == FieldStatus::Fallow
    }

    pub fn can_plant(&self) -> bool {
        self.status == FieldStatus::Tilled
    }

    pub fn can_harvest(&self) -> bool {
        self.status == FieldStatus::Ready
    }

    // ── Player transitions (guard already checked) ─────────────

    pub fn till(&mut self, now: DateTime<Utc>) {
        debug_assert!(self.can_till());
        self.status = FieldStatus::Tilled;
        self.soil_moisture = clamp_pct(self.soil_moisture - 4.0);
        self.last_worked_at = now;
    }

    pub fn plant(&mut self, crop: Crop, now: DateTime<Utc>, rng: &mut FarmRng) {
        debug_assert!(self.can_plant());
        self.status = FieldStatus::Growing;
        self.crop = Some(crop);
        self.growth = 5.0;
        self.soil_moisture = clamp_pct(self.soil_moisture - 6.0 + rng.uniform(0.0, 6.0));
        self.last_worked_at = now;
    }

    pub fn water(&mut self, now: DateTime<Utc>) {
        self.soil_moisture = clamp_pct(self.soil_moisture + 18.0);
        self.last_worked_at = now;
    }

    /// Clears the plot and returns the harvested (crop, yield).
    /// Yield is 12 + floor(u * 8), i.e. an integer in [12, 19].
    pub fn harvest(&mut self, now: DateTime<Utc>, rng: &mut FarmRng) -> (Crop, u32) {
        debug_assert!(self.can_harvest());
        let crop = self.crop.take().expect("ready field always carries a crop");
        let amount = 12 + rng.next_u64_below(8) as u32;
        self.status = FieldStatus::Fallow;
        self.growth = 0.0;
        self.soil_moisture = clamp_pct(self.soil_moisture - 8.0);
        self.last_worked_at = now;
        (crop, amount)
    }

    /// Escape hatch: force the plot back to fallow from any status.
    /// Never touches inventory.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.status = FieldStatus::Fallow;
        self.crop = None;
        self.growth = 0.0;
        self.soil_moisture = clamp_pct(self.soil_moisture - 3.0);
        self.last_worked_at = now;
    }

    // ── Tick update ────────────────────────────────────────────

    /// Per-tick growth/moisture step under the current weather
    /// profile. Growth gain never goes negative, and the flip to
    /// `ready` plus the pin at 100 happen in the same step — an
    /// overshoot past 100 is never observable.
    pub fn tick_update(&mut self, profile: WeatherProfile) {
        match self.status {
            FieldStatus::Growing => {
                self.soil_moisture = clamp_pct(self.soil_moisture + profile.moisture_delta - 2.0);
                let stress = if self.soil_moisture < MOISTURE_STRESS_THRESHOLD {
                    -3.0
                } else {
                    0.0
                };
                let gain = (profile.growth + stress).max(0.0);
                self.growth = clamp_pct(self.growth + gain);
                if self.growth >= 100.0 {
                    self.status = FieldStatus::Ready;
                    self.growth = 100.0;
                }
            }
            FieldStatus::Fallow => {
                self.soil_moisture = clamp_pct(self.soil_moisture + profile.moisture_delta / 3.0);
            }
            FieldStatus::Tilled => {
                self.soil_moisture = clamp_pct(self.soil_moisture + profile.moisture_delta / 2.0);
            }
            FieldStatus::Ready => {}
        }
    }
}
