//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};

/// A simulation tick. One tick = one in-game growth step.
pub type Tick = u64;

/// Stable identifier of a plot. Fields are created once at engine
/// start and never added or removed during a session.
pub type FieldId = u32;

/// Campaign mission identifier.
pub type MissionId = String;

/// UI scene identifier (used only for bookkeeping, never gameplay).
pub type SceneId = String;

/// Per-scene checklist task identifier.
pub type TaskId = String;

/// The fixed crop set. The declared order [wheat, corn, soy] is
/// load-bearing: the automation planner breaks price ties by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Wheat,
    Corn,
    Soy,
}

impl Crop {
    /// Declared crop order. NEVER reorder — planner tie-breaks depend on it.
    pub const ALL: [Crop; 3] = [Crop::Wheat, Crop::Corn, Crop::Soy];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Corn => "corn",
            Self::Soy => "soy",
        }
    }

    /// Market random-walk volatility. A price step is drawn
    /// uniformly from [-v/2, v/2].
    pub fn volatility(&self) -> f64 {
        match self {
            Self::Wheat => 2.0,
            Self::Corn => 2.5,
            Self::Soy => 3.0,
        }
    }
}
