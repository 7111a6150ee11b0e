//! Automation planner — the heuristic that plays the farm loop
//! unattended.
//!
//! RULE: the planner never mutates state. It reads a snapshot and
//! returns exactly one action (or none) plus a human-readable message;
//! the engine routes the action back through the same transition
//! function manual play uses.
//!
//! Priority order, first match wins:
//!   1. till the lowest-id fallow field
//!   2. plant the lowest-id tilled field with the priciest crop
//!   3. water the lowest-id growing field below the moisture threshold
//!   4. harvest the lowest-id ready field
//!   5. sell the whole held quantity of the priciest held crop
//!   6. nothing to do
//!
//! Crop choices sort by descending price with ties broken by the
//! declared crop order [wheat, corn, soy] (stable sort). That order
//! is behavior, not taste — keep it.

use crate::{
    action::Action,
    config::PLANNER_MOISTURE_THRESHOLD,
    field::FieldStatus,
    snapshot::Snapshot,
    types::Crop,
};

pub const IDLE_MESSAGE: &str = "All crop loops are current. No automation needed.";

#[derive(Debug, Clone, PartialEq)]
pub struct AutomationPlan {
    pub action: Option<Action>,
    pub message: String,
}

/// Pick the single next action. Pure and deterministic: equal
/// snapshots always produce equal plans.
pub fn plan_next_action(snapshot: &Snapshot) -> AutomationPlan {
    if let Some(field) = lowest_with(snapshot, FieldStatus::Fallow) {
        return AutomationPlan {
            action: Some(Action::TillField { field_id: field }),
            message: format!("Tilling field {field} to start a new crop loop."),
        };
    }

    if let Some(field) = lowest_with(snapshot, FieldStatus::Tilled) {
        let crop = best_priced_crop(snapshot, |_| true);
        return AutomationPlan {
            action: Some(Action::PlantField { field_id: field, crop }),
            message: format!(
                "Planting {} in field {field} at {:.1} credits per unit.",
                crop.name(),
                snapshot.price(crop)
            ),
        };
    }

    if let Some(field) = snapshot
        .fields
        .iter()
        .find(|f| f.status == FieldStatus::Growing && f.soil_moisture < PLANNER_MOISTURE_THRESHOLD)
    {
        return AutomationPlan {
            action: Some(Action::WaterField { field_id: field.id }),
            message: format!(
                "Watering field {} (moisture {:.0}%).",
                field.id, field.soil_moisture
            ),
        };
    }

    if let Some(field) = lowest_with(snapshot, FieldStatus::Ready) {
        return AutomationPlan {
            action: Some(Action::HarvestField { field_id: field }),
            message: format!("Harvesting field {field}."),
        };
    }

    if snapshot.inventory.values().any(|&q| q > 0) {
        let crop = best_priced_crop(snapshot, |c| snapshot.quantity(c) > 0);
        return AutomationPlan {
            action: Some(Action::SellProduce { crop, amount: 0 }),
            message: format!(
                "Selling {} {} at {:.1} credits per unit.",
                snapshot.quantity(crop),
                crop.name(),
                snapshot.price(crop)
            ),
        };
    }

    AutomationPlan {
        action: None,
        message: IDLE_MESSAGE.to_string(),
    }
}

/// Lowest field id with the given status. Fields are stored in id
/// order, so the first hit is the lowest.
fn lowest_with(snapshot: &Snapshot, status: FieldStatus) -> Option<u32> {
    snapshot
        .fields
        .iter()
        .find(|f| f.status == status)
        .map(|f| f.id)
}

/// Highest-priced crop among those passing the filter, ties broken by
/// declared order. Stable sort over Crop::ALL preserves that order.
fn best_priced_crop(snapshot: &Snapshot, keep: impl Fn(Crop) -> bool) -> Crop {
    let mut candidates: Vec<Crop> = Crop::ALL.iter().copied().filter(|&c| keep(c)).collect();
    candidates.sort_by(|a, b| {
        snapshot
            .price(*b)
            .partial_cmp(&snapshot.price(*a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates[0]
}
