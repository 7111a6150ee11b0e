//! The simulation engine — one snapshot lineage, one transition
//! function.
//!
//! TRANSITION ORDER inside AdvanceTick (fixed, documented, never
//! reordered):
//!   1. tick counter
//!   2. weather generator
//!   3. market engine
//!   4. every field's growth update (post-update weather profile)
//!
//! RULES:
//!   - Every externally visible change is one `dispatch` call.
//!   - `apply` is total: malformed payloads and guard violations
//!     return None and the caller keeps the previous Arc, so the UI
//!     can detect "nothing happened" by pointer equality.
//!   - All randomness flows through the RngBank; all timestamps
//!     through the TimeSource.
//!   - Listeners are notified synchronously, only on applied actions.

use crate::{
    action::{Action, TutorialFlagKey},
    bus::{Listener, SnapshotBus, SubscriptionId},
    campaign,
    config::SimConfig,
    field::FieldStatus,
    ledger, market, planner,
    rng::RngBank,
    snapshot::{SceneVisit, Snapshot},
    time::{SystemTime, TimeSource},
    weather,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Collaborators a single transition may draw on.
pub struct TickContext<'a> {
    pub rng: &'a mut RngBank,
    pub now: DateTime<Utc>,
}

pub struct FarmEngine {
    snapshot: Arc<Snapshot>,
    rng: RngBank,
    time: Box<dyn TimeSource>,
    bus: SnapshotBus,
}

impl FarmEngine {
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        Self::with_time_source(config, seed, Box::new(SystemTime))
    }

    pub fn with_time_source(config: &SimConfig, seed: u64, mut time: Box<dyn TimeSource>) -> Self {
        let snapshot = Snapshot::initial(config, time.now());
        Self {
            snapshot: Arc::new(snapshot),
            rng: RngBank::new(seed),
            time,
            bus: SnapshotBus::new(),
        }
    }

    /// Resume from an existing snapshot (replay tooling and tests).
    pub fn from_snapshot(snapshot: Snapshot, seed: u64, time: Box<dyn TimeSource>) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            rng: RngBank::new(seed),
            time,
            bus: SnapshotBus::new(),
        }
    }

    /// The current state. Read-only; cheap to clone (Arc).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Apply one action. Returns the resulting snapshot — the very
    /// same Arc as before when the action was a no-op.
    pub fn dispatch(&mut self, action: Action) -> Arc<Snapshot> {
        let now = self.time.now();
        let mut ctx = TickContext {
            rng: &mut self.rng,
            now,
        };
        match apply(&self.snapshot, &action, &mut ctx) {
            Some(next) => {
                self.snapshot = Arc::new(next);
                self.bus.notify(&self.snapshot);
            }
            None => log::trace!("ignored action: {action:?}"),
        }
        Arc::clone(&self.snapshot)
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}

/// The pure transition function. None means the snapshot is unchanged
/// and the caller must not allocate a replacement.
pub fn apply(snapshot: &Snapshot, action: &Action, ctx: &mut TickContext) -> Option<Snapshot> {
    match action {
        Action::AdvanceTick => Some(advance_tick(snapshot, ctx)),

        // ── Field work ─────────────────────────────────────────
        Action::TillField { field_id } => {
            snapshot.field(*field_id).filter(|f| f.can_till())?;
            let mut next = snapshot.clone();
            next.field_mut(*field_id)?.till(ctx.now);
            next.tutorial.tilled = true;
            Some(next)
        }
        Action::PlantField { field_id, crop } => {
            snapshot.field(*field_id).filter(|f| f.can_plant())?;
            let mut next = snapshot.clone();
            next.field_mut(*field_id)?.plant(*crop, ctx.now, &mut ctx.rng.fields);
            next.tutorial.planted = true;
            Some(next)
        }
        Action::WaterField { field_id } => {
            snapshot.field(*field_id)?;
            let mut next = snapshot.clone();
            next.field_mut(*field_id)?.water(ctx.now);
            next.tutorial.watered = true;
            Some(next)
        }
        Action::HarvestField { field_id } => {
            snapshot.field(*field_id).filter(|f| f.can_harvest())?;
            let mut next = snapshot.clone();
            let (crop, amount) = next.field_mut(*field_id)?.harvest(ctx.now, &mut ctx.rng.fields);
            ledger::store_harvest(&mut next, crop, amount);
            log::debug!("harvested {amount} {} from field {field_id}", crop.name());
            Some(next)
        }
        Action::ResetField { field_id } => {
            snapshot.field(*field_id)?;
            let mut next = snapshot.clone();
            next.field_mut(*field_id)?.reset(ctx.now);
            Some(next)
        }

        // ── Market ─────────────────────────────────────────────
        Action::SellProduce { crop, amount } => {
            let sell_amount = ledger::sellable_amount(snapshot, *crop, *amount);
            if sell_amount == 0 {
                return None;
            }
            let mut next = snapshot.clone();
            ledger::sell(&mut next, *crop, sell_amount);
            Some(next)
        }

        // ── Campaign ───────────────────────────────────────────
        Action::StartMission { mission_id } => {
            let mut state = snapshot.campaign.clone();
            if !campaign::start_mission(&mut state, mission_id) {
                return None;
            }
            let mut next = snapshot.clone();
            next.campaign = state;
            Some(next)
        }
        Action::CompleteMission {
            mission_id,
            unlock_next,
        } => {
            let mut state = snapshot.campaign.clone();
            if !campaign::complete_mission(&mut state, mission_id, unlock_next.as_ref()) {
                return None;
            }
            let mut next = snapshot.clone();
            next.campaign = state;
            Some(next)
        }
        Action::AbortMission => {
            let mut state = snapshot.campaign.clone();
            if !campaign::abort_mission(&mut state) {
                return None;
            }
            let mut next = snapshot.clone();
            next.campaign = state;
            Some(next)
        }

        // ── Tutorial / UI bookkeeping ──────────────────────────
        Action::MarkTutorialFlag { key, value } => {
            // Monotonic: clearing a flag is never allowed.
            if !value.unwrap_or(true) {
                return None;
            }
            let flag = tutorial_flag(snapshot, *key);
            if *flag {
                return None;
            }
            let mut next = snapshot.clone();
            *tutorial_flag_mut(&mut next, *key) = true;
            Some(next)
        }
        Action::QueueAlert { kind, message } => {
            let mut next = snapshot.clone();
            next.queue_alert(kind.clone(), message.clone());
            Some(next)
        }
        Action::MarkTaskComplete { scene, task } => {
            if snapshot
                .completed_tasks
                .get(scene)
                .is_some_and(|tasks| tasks.contains(task))
            {
                return None;
            }
            let mut next = snapshot.clone();
            next.completed_tasks
                .entry(scene.clone())
                .or_default()
                .insert(task.clone());
            Some(next)
        }
        Action::SetActiveScene { scene } => {
            let mut next = snapshot.clone();
            next.active_scene = Some(scene.clone());
            let visit = next
                .scene_visits
                .entry(scene.clone())
                .or_insert(SceneVisit {
                    count: 0,
                    last_entered_at: ctx.now,
                });
            visit.count += 1;
            visit.last_entered_at = ctx.now;
            Some(next)
        }

        // ── Automation ─────────────────────────────────────────
        Action::AutoProgress => {
            let plan = planner::plan_next_action(snapshot);
            log::debug!("automation: {}", plan.message);
            let mut next = match &plan.action {
                // Planner actions are derived from the snapshot and
                // always pass their guards.
                Some(inner) => apply(snapshot, inner, ctx)?,
                None => {
                    if snapshot.last_automation_message.as_deref() == Some(&plan.message) {
                        return None;
                    }
                    snapshot.clone()
                }
            };
            next.last_automation_message = Some(plan.message);
            Some(next)
        }
    }
}

fn advance_tick(snapshot: &Snapshot, ctx: &mut TickContext) -> Snapshot {
    let mut next = snapshot.clone();
    next.tick += 1;

    next.weather = weather::advance_weather(&snapshot.weather, next.tick, &mut ctx.rng.weather);
    next.market = market::adjust_market(&snapshot.market, next.tick, &mut ctx.rng.market);

    let profile = next.weather.condition.profile();
    for field in &mut next.fields {
        field.tick_update(profile);
    }

    if log::log_enabled!(log::Level::Trace) {
        let ready = next
            .fields
            .iter()
            .filter(|f| f.status == FieldStatus::Ready)
            .count();
        log::trace!("tick={} ready_fields={ready}", next.tick);
    }

    next
}

fn tutorial_flag(snapshot: &Snapshot, key: TutorialFlagKey) -> &bool {
    let t = &snapshot.tutorial;
    match key {
        TutorialFlagKey::IntroAcknowledged => &t.intro_acknowledged,
        TutorialFlagKey::Tilled => &t.tilled,
        TutorialFlagKey::Planted => &t.planted,
        TutorialFlagKey::Watered => &t.watered,
        TutorialFlagKey::Harvested => &t.harvested,
        TutorialFlagKey::Sold => &t.sold,
    }
}

fn tutorial_flag_mut(snapshot: &mut Snapshot, key: TutorialFlagKey) -> &mut bool {
    let t = &mut snapshot.tutorial;
    match key {
        TutorialFlagKey::IntroAcknowledged => &mut t.intro_acknowledged,
        TutorialFlagKey::Tilled => &mut t.tilled,
        TutorialFlagKey::Planted => &mut t.planted,
        TutorialFlagKey::Watered => &mut t.watered,
        TutorialFlagKey::Harvested => &mut t.harvested,
        TutorialFlagKey::Sold => &mut t.sold,
    }
}
