//! Campaign progression — active/completed/unlocked mission ids.
//!
//! Membership never regresses: completed and unlocked only grow
//! (monotonic union), and every operation is idempotent. Each helper
//! returns whether it changed anything so the engine can keep a fully
//! redundant request a true no-op.

use crate::{snapshot::CampaignState, types::MissionId};

pub fn start_mission(campaign: &mut CampaignState, mission_id: &MissionId) -> bool {
    let already_active = campaign.active_mission.as_ref() == Some(mission_id);
    let newly_unlocked = campaign.unlocked_missions.insert(mission_id.clone());
    if already_active && !newly_unlocked {
        return false;
    }
    campaign.active_mission = Some(mission_id.clone());
    true
}

pub fn complete_mission(
    campaign: &mut CampaignState,
    mission_id: &MissionId,
    unlock_next: Option<&MissionId>,
) -> bool {
    let mut changed = campaign.completed_missions.insert(mission_id.clone());
    if let Some(next) = unlock_next {
        changed |= campaign.unlocked_missions.insert(next.clone());
    }
    if campaign.active_mission.is_some() {
        campaign.active_mission = None;
        changed = true;
    }
    changed
}

pub fn abort_mission(campaign: &mut CampaignState) -> bool {
    if campaign.active_mission.is_none() {
        return false;
    }
    campaign.active_mission = None;
    true
}
