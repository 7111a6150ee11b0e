//! The action vocabulary — every way the outside world may mutate
//! the simulation, as one closed tagged union.
//!
//! RULE: all stimuli (timer ticks, player commands, automation) are
//! normalized into an `Action` and fed through the one transition
//! function. Variants are added, never removed or reordered.

use crate::types::{Crop, FieldId, MissionId, SceneId, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    // ── Simulation clock ──────────────────────────
    AdvanceTick,

    // ── Field work ────────────────────────────────
    TillField { field_id: FieldId },
    PlantField { field_id: FieldId, crop: Crop },
    WaterField { field_id: FieldId },
    HarvestField { field_id: FieldId },
    ResetField { field_id: FieldId },

    // ── Market ────────────────────────────────────
    /// amount = 0 sells the whole held quantity.
    SellProduce { crop: Crop, amount: u32 },

    // ── Campaign ──────────────────────────────────
    StartMission { mission_id: MissionId },
    CompleteMission {
        mission_id: MissionId,
        unlock_next: Option<MissionId>,
    },
    AbortMission,

    // ── Tutorial / UI bookkeeping ─────────────────
    MarkTutorialFlag {
        key: TutorialFlagKey,
        #[serde(default)]
        value: Option<bool>,
    },
    QueueAlert { kind: String, message: String },
    MarkTaskComplete { scene: SceneId, task: TaskId },
    SetActiveScene { scene: SceneId },

    // ── Automation ────────────────────────────────
    /// Runs the planner and applies its single chosen action.
    AutoProgress,
}

/// Closed key set for `MarkTutorialFlag`. Flags are monotonic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TutorialFlagKey {
    IntroAcknowledged,
    Tilled,
    Planted,
    Watered,
    Harvested,
    Sold,
}
