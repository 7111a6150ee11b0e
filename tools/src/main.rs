//! sim-runner: headless runner for the farm simulation engine.
//!
//! Usage:
//!   sim-runner --seed 12345 --ticks 120
//!   sim-runner --seed 12345 --ticks 120 --auto
//!   sim-runner --seed 12345 --ticks 60 --interval-ms 50 --out final.json

use agrisim_core::{
    driver::TickDriver,
    engine::FarmEngine,
    Action, SimConfig,
};
use anyhow::Result;
use std::{env, fs, sync::mpsc, time::Duration};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 120u64);
    let auto = args.iter().any(|a| a == "--auto");
    let interval_ms = args
        .windows(2)
        .find(|w| w[0] == "--interval-ms")
        .and_then(|w| w[1].parse::<u64>().ok());
    let out = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].clone());

    println!("agrisim — sim-runner");
    println!("  seed:  {seed}");
    println!("  ticks: {ticks}");
    println!("  auto:  {auto}");
    println!();

    let mut engine = FarmEngine::new(&SimConfig::default(), seed);

    match interval_ms {
        // Real-time mode: the cancellable driver emits AdvanceTick
        // into a channel and we pump it into dispatch.
        Some(ms) => {
            let (tx, rx) = mpsc::channel();
            let mut driver = TickDriver::start(Duration::from_millis(ms), tx);
            for action in rx.iter().take(ticks as usize) {
                engine.dispatch(action);
                if auto {
                    engine.dispatch(Action::AutoProgress);
                }
            }
            driver.stop();
        }
        // Fast-forward mode: tight loop.
        None => {
            for _ in 0..ticks {
                engine.dispatch(Action::AdvanceTick);
                if auto {
                    engine.dispatch(Action::AutoProgress);
                }
            }
        }
    }

    print_summary(&engine);

    if let Some(path) = out {
        let snapshot = engine.snapshot();
        fs::write(&path, serde_json::to_string_pretty(&*snapshot)?)?;
        println!("\nFinal snapshot written to {path}");
    }

    Ok(())
}

fn print_summary(engine: &FarmEngine) {
    let snapshot = engine.snapshot();

    println!("── Summary ───────────────────────────────");
    println!("  tick:    {}", snapshot.tick);
    println!("  credits: {:.2}", snapshot.resources.credits);
    println!("  weather: {:?}", snapshot.weather.condition);
    if let Some(msg) = &snapshot.last_automation_message {
        println!("  planner: {msg}");
    }

    println!("  fields:");
    for field in &snapshot.fields {
        println!(
            "    #{} {:?} crop={} growth={:.0}% moisture={:.0}%",
            field.id,
            field.status,
            field.crop.map(|c| c.name()).unwrap_or("-"),
            field.growth,
            field.soil_moisture
        );
    }

    println!("  inventory / market:");
    for (crop, qty) in &snapshot.inventory {
        println!(
            "    {:5} qty={qty:3} price={:.1}",
            crop.name(),
            snapshot.price(*crop)
        );
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
