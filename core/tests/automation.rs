use agrisim_core::{
    engine::FarmEngine,
    field::FieldStatus,
    planner::{self, IDLE_MESSAGE},
    time::FixedTime,
    Action, Crop, SimConfig, Snapshot,
};
use std::sync::Arc;

fn test_engine(seed: u64) -> FarmEngine {
    FarmEngine::with_time_source(&SimConfig::default(), seed, Box::new(FixedTime::at_epoch()))
}

/// Rebuild an engine around a hand-edited snapshot.
fn engine_from(snapshot: Snapshot, seed: u64) -> FarmEngine {
    FarmEngine::from_snapshot(snapshot, seed, Box::new(FixedTime::at_epoch()))
}

fn set_all_fields(snapshot: &mut Snapshot, status: FieldStatus, crop: Option<Crop>, moisture: f64) {
    for field in &mut snapshot.fields {
        field.status = status;
        field.crop = crop;
        field.growth = if status == FieldStatus::Ready { 100.0 } else { 50.0 };
        field.soil_moisture = moisture;
    }
}

#[test]
fn priority_1_tills_the_lowest_fallow_field() {
    let mut engine = test_engine(61);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(snap.field(0).unwrap().status, FieldStatus::Tilled);
    assert!(snap
        .last_automation_message
        .as_deref()
        .unwrap()
        .contains("Tilling field 0"));
}

#[test]
fn priority_1_beats_everything_else() {
    // Fallow field 5 plus held inventory: tilling still wins.
    let engine = test_engine(62);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Growing, Some(Crop::Corn), 80.0);
    snapshot.fields[5].status = FieldStatus::Fallow;
    snapshot.fields[5].crop = None;
    snapshot.inventory.insert(Crop::Wheat, 10);
    let mut engine = engine_from(snapshot, 62);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(snap.field(5).unwrap().status, FieldStatus::Tilled);
    assert_eq!(snap.quantity(Crop::Wheat), 10, "nothing sold yet");
}

#[test]
fn priority_2_plants_the_priciest_crop() {
    let engine = test_engine(63);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Tilled, None, 50.0);
    // Defaults: soy 18.0 is the most valuable.
    let mut engine = engine_from(snapshot, 63);

    let snap = engine.dispatch(Action::AutoProgress);
    let field = snap.field(0).unwrap();
    assert_eq!(field.status, FieldStatus::Growing);
    assert_eq!(field.crop, Some(Crop::Soy));
}

#[test]
fn price_ties_break_by_declared_crop_order() {
    let engine = test_engine(64);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Tilled, None, 50.0);
    for crop in Crop::ALL {
        snapshot.market.get_mut(&crop).unwrap().price = 10.0;
    }
    let mut engine = engine_from(snapshot, 64);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(
        snap.field(0).unwrap().crop,
        Some(Crop::Wheat),
        "equal prices must fall back to [wheat, corn, soy] order"
    );
}

#[test]
fn priority_3_waters_the_lowest_dry_growing_field() {
    let engine = test_engine(65);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Growing, Some(Crop::Corn), 80.0);
    snapshot.fields[2].soil_moisture = 40.0;
    snapshot.fields[4].soil_moisture = 30.0;
    let mut engine = engine_from(snapshot, 65);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(
        snap.field(2).unwrap().soil_moisture,
        58.0,
        "field 2 is the lowest id below the 55 threshold"
    );
    assert_eq!(snap.field(4).unwrap().soil_moisture, 30.0);
}

#[test]
fn priority_4_harvests_ready_fields() {
    let engine = test_engine(66);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Growing, Some(Crop::Corn), 80.0);
    snapshot.fields[3].status = FieldStatus::Ready;
    snapshot.fields[3].growth = 100.0;
    let mut engine = engine_from(snapshot, 66);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(snap.field(3).unwrap().status, FieldStatus::Fallow);
    assert!(snap.quantity(Crop::Corn) >= 12);
}

#[test]
fn priority_5_sells_the_priciest_held_crop_entirely() {
    let engine = test_engine(67);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Growing, Some(Crop::Soy), 80.0);
    snapshot.inventory.insert(Crop::Wheat, 5);
    snapshot.inventory.insert(Crop::Corn, 2);
    // corn (15.0) outprices wheat (12.0); soy is pricier but unheld.
    let mut engine = engine_from(snapshot, 67);

    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(snap.quantity(Crop::Corn), 0, "whole corn stock sells");
    assert_eq!(snap.quantity(Crop::Wheat), 5, "wheat waits its turn");
}

#[test]
fn planner_never_mutates_the_snapshot() {
    let engine = test_engine(68);
    let before = engine.snapshot();
    let plan_a = planner::plan_next_action(&before);
    let plan_b = planner::plan_next_action(&before);
    assert_eq!(plan_a, plan_b, "planning must be deterministic and pure");
    assert_eq!(*engine.snapshot(), *before);
}

#[test]
fn repeated_autoprogress_reaches_the_idle_fixpoint() {
    let mut engine = test_engine(69);

    let mut idle_at = None;
    for step in 0..200 {
        let snap = engine.dispatch(Action::AutoProgress);
        if snap.last_automation_message.as_deref() == Some(IDLE_MESSAGE) {
            idle_at = Some(step);
            break;
        }
    }
    let idle_at = idle_at.expect("automation never settled in 200 steps");

    // 6 tills + 6 plants + bounded watering + nothing to sell.
    assert!(idle_at < 40, "fixpoint took {idle_at} steps");

    let snap = engine.snapshot();
    for field in &snap.fields {
        assert_eq!(field.status, FieldStatus::Growing);
        assert!(field.soil_moisture >= 55.0);
    }
    assert!(snap.inventory.values().all(|&q| q == 0));

    // Once idle, further requests are true no-ops.
    let before = engine.snapshot();
    let after = engine.dispatch(Action::AutoProgress);
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn automation_drains_a_ripe_farm_into_sales() {
    let engine = test_engine(70);
    let mut snapshot = (*engine.snapshot()).clone();
    set_all_fields(&mut snapshot, FieldStatus::Ready, Some(Crop::Wheat), 80.0);
    let mut engine = engine_from(snapshot, 70);
    let credits_before = engine.snapshot().resources.credits;

    // Harvests first (priority 4 — no fallow/tilled/dry fields exist
    // until the first harvest flips a plot back to fallow).
    let snap = engine.dispatch(Action::AutoProgress);
    assert_eq!(snap.field(0).unwrap().status, FieldStatus::Fallow);
    assert!(snap.quantity(Crop::Wheat) >= 12);

    // Keep going: the loop re-tills, harvests the rest, and sells.
    for _ in 0..60 {
        engine.dispatch(Action::AutoProgress);
    }
    let snap = engine.snapshot();
    assert!(
        snap.resources.credits > credits_before,
        "the harvested wheat must eventually be sold"
    );
}
