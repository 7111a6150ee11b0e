use agrisim_core::{
    engine::FarmEngine,
    time::FixedTime,
    Action, Crop, SimConfig,
};

fn test_engine(seed: u64) -> FarmEngine {
    FarmEngine::with_time_source(&SimConfig::default(), seed, Box::new(FixedTime::at_epoch()))
}

#[test]
fn prices_hold_still_inside_the_throttle_window() {
    let mut engine = test_engine(31);
    let initial = engine.snapshot();

    for _ in 0..3 {
        let snap = engine.dispatch(Action::AdvanceTick);
        for crop in Crop::ALL {
            assert_eq!(
                snap.price(crop),
                initial.price(crop),
                "price moved before the 4-tick window closed"
            );
            assert_eq!(snap.market.get(&crop).unwrap().last_adjusted_tick, 0);
        }
    }

    let snap = engine.dispatch(Action::AdvanceTick);
    assert_eq!(snap.tick, 4);
    for crop in Crop::ALL {
        assert_eq!(
            snap.market.get(&crop).unwrap().last_adjusted_tick,
            4,
            "all crops adjust on the same cadence"
        );
    }
}

#[test]
fn prices_never_fall_below_the_floor() {
    let engine = test_engine(32);
    let mut snapshot = (*engine.snapshot()).clone();
    for crop in Crop::ALL {
        snapshot.market.get_mut(&crop).unwrap().price = 4.0;
    }
    let mut engine = FarmEngine::from_snapshot(snapshot, 32, Box::new(FixedTime::at_epoch()));

    for _ in 0..200 {
        let snap = engine.dispatch(Action::AdvanceTick);
        for crop in Crop::ALL {
            assert!(
                snap.price(crop) >= 4.0,
                "{} price {} dipped below the floor",
                crop.name(),
                snap.price(crop)
            );
        }
    }
}

#[test]
fn prices_round_to_one_decimal() {
    let mut engine = test_engine(33);

    for _ in 0..100 {
        let snap = engine.dispatch(Action::AdvanceTick);
        for crop in Crop::ALL {
            let scaled = snap.price(crop) * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "{} price {} is not one-decimal",
                crop.name(),
                snap.price(crop)
            );
        }
    }
}

#[test]
fn drift_actually_moves_prices_over_time() {
    let mut engine = test_engine(34);
    let initial = engine.snapshot();

    for _ in 0..100 {
        engine.dispatch(Action::AdvanceTick);
    }
    let snap = engine.snapshot();

    let moved = Crop::ALL
        .iter()
        .any(|&crop| snap.price(crop) != initial.price(crop));
    assert!(moved, "100 ticks of drift left every price unchanged");
}
