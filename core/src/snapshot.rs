//! The snapshot — complete simulation state as one immutable value.
//!
//! RULE: every externally visible state change replaces the whole
//! snapshot atomically. Transitions clone, mutate the clone, and hand
//! it back; a refused action returns nothing so the caller keeps the
//! previous allocation (reference equality is the UI's change check).
//!
//! Collections are BTree-based so serialized snapshots are
//! byte-stable — the determinism tests compare JSON directly.

use crate::{
    config::{SimConfig, ALERT_CAP},
    error::SimResult,
    field::Field,
    market::{initial_market, Market},
    types::{Crop, MissionId, SceneId, TaskId, Tick},
    weather::Weather,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

// ── Numeric helpers ────────────────────────────────────────────

/// Clamp a percentage-typed value into [0, 100].
pub fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Round to one decimal (market prices).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimals (currency).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── State pieces ───────────────────────────────────────────────

/// Farm-wide resource gauges. All percentages; credits is currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resources {
    pub water: f64,
    pub soil_health: f64,
    pub energy: f64,
    pub research: f64,
    pub credits: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignState {
    pub active_mission: Option<MissionId>,
    pub completed_missions: BTreeSet<MissionId>,
    pub unlocked_missions: BTreeSet<MissionId>,
}

/// Tutorial milestones. Monotonic: flags only ever flip false -> true.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TutorialFlags {
    pub intro_acknowledged: bool,
    pub tilled: bool,
    pub planted: bool,
    pub watered: bool,
    pub harvested: bool,
    pub sold: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: String,
    pub message: String,
}

/// Side information only — visits never affect gameplay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneVisit {
    pub count: u32,
    pub last_entered_at: DateTime<Utc>,
}

// ── The snapshot ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub tick: Tick,
    pub resources: Resources,
    pub inventory: BTreeMap<Crop, u32>,
    pub market: Market,
    pub weather: Weather,
    pub fields: Vec<Field>,
    pub campaign: CampaignState,
    pub tutorial: TutorialFlags,
    pub completed_tasks: BTreeMap<SceneId, BTreeSet<TaskId>>,
    pub scene_visits: BTreeMap<SceneId, SceneVisit>,
    pub active_scene: Option<SceneId>,
    pub alerts: VecDeque<Alert>,
    next_alert_id: u64,
    pub last_automation_message: Option<String>,
}

impl Snapshot {
    /// The fixed session start state: all plots fallow, one mission
    /// unlocked, empty inventory.
    pub fn initial(config: &SimConfig, created_at: DateTime<Utc>) -> Self {
        let fields = (0..config.field_count)
            .map(|id| Field::new(id, config.starting_moisture, created_at))
            .collect();
        let inventory = Crop::ALL.iter().map(|&c| (c, 0)).collect();
        let mut unlocked = BTreeSet::new();
        unlocked.insert(config.first_unlocked_mission.clone());

        Self {
            tick: 0,
            resources: Resources {
                water: clamp_pct(config.starting_water),
                soil_health: clamp_pct(config.starting_soil_health),
                energy: clamp_pct(config.starting_energy),
                research: clamp_pct(config.starting_research),
                credits: round2(config.starting_credits.max(0.0)),
            },
            inventory,
            market: initial_market(config),
            weather: Weather::initial(),
            fields,
            campaign: CampaignState {
                active_mission: None,
                completed_missions: BTreeSet::new(),
                unlocked_missions: unlocked,
            },
            tutorial: TutorialFlags::default(),
            completed_tasks: BTreeMap::new(),
            scene_visits: BTreeMap::new(),
            active_scene: None,
            alerts: VecDeque::new(),
            next_alert_id: 0,
            last_automation_message: None,
        }
    }

    pub fn field(&self, id: u32) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: u32) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn quantity(&self, crop: Crop) -> u32 {
        self.inventory.get(&crop).copied().unwrap_or(0)
    }

    pub fn price(&self, crop: Crop) -> f64 {
        self.market.get(&crop).map(|m| m.price).unwrap_or(0.0)
    }

    /// Append an alert, evicting the oldest once the cap is hit.
    pub fn queue_alert(&mut self, kind: String, message: String) {
        let id = self.next_alert_id;
        self.next_alert_id += 1;
        self.alerts.push_back(Alert { id, kind, message });
        while self.alerts.len() > ALERT_CAP {
            self.alerts.pop_front();
        }
    }

    // ── Serialization (external persistence hooks) ─────────────

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
