//! No-op discipline: a refused action returns the same allocation
//! (pointer equality) and notifies no subscriber. The consuming UI
//! relies on this for cheap change detection.

use agrisim_core::{
    engine::FarmEngine,
    time::FixedTime,
    Action, Crop, SimConfig,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

fn test_engine(seed: u64) -> FarmEngine {
    FarmEngine::with_time_source(&SimConfig::default(), seed, Box::new(FixedTime::at_epoch()))
}

#[test]
fn guard_failures_keep_the_same_allocation() {
    let mut engine = test_engine(81);
    let before = engine.snapshot();

    let refused = [
        Action::PlantField {
            field_id: 0,
            crop: Crop::Wheat,
        },
        Action::HarvestField { field_id: 0 },
        Action::TillField { field_id: 404 },
        Action::SellProduce {
            crop: Crop::Corn,
            amount: 3,
        },
        Action::AbortMission,
    ];

    for action in refused {
        let after = engine.dispatch(action.clone());
        assert!(
            Arc::ptr_eq(&before, &after),
            "{action:?} should have been a no-op"
        );
    }
}

#[test]
fn subscribers_fire_only_on_applied_actions() {
    let mut engine = test_engine(82);
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    engine.subscribe(Box::new(move |_snapshot| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    engine.dispatch(Action::HarvestField { field_id: 0 }); // refused
    assert_eq!(seen.load(Ordering::SeqCst), 0);

    engine.dispatch(Action::TillField { field_id: 0 }); // applied
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    engine.dispatch(Action::AdvanceTick); // applied
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut engine = test_engine(83);
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let id = engine.subscribe(Box::new(move |_snapshot| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    engine.dispatch(Action::AdvanceTick);
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id), "double unsubscribe reports dead id");

    engine.dispatch(Action::AdvanceTick);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_sees_the_snapshot_it_was_notified_with() {
    let mut engine = test_engine(84);
    let observed_tick = Arc::new(AtomicUsize::new(usize::MAX));
    let slot = Arc::clone(&observed_tick);
    engine.subscribe(Box::new(move |snapshot| {
        slot.store(snapshot.tick as usize, Ordering::SeqCst);
    }));

    let snap = engine.dispatch(Action::AdvanceTick);
    assert_eq!(observed_tick.load(Ordering::SeqCst), snap.tick as usize);
}
