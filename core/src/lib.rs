//! agrisim-core — the farm simulation engine.
//!
//! A tick-driven state machine for a small educational farm economy:
//! plots cycle through a planting lifecycle, weather and market
//! conditions drift, and every external stimulus (clock, player,
//! automation) becomes one `Action` fed through one pure transition.
//!
//! RULES:
//!   - One snapshot lineage per engine; transitions replace it atomically.
//!   - Guard failures and malformed payloads are silent no-ops.
//!   - All randomness flows through the RngBank, all timestamps
//!     through the TimeSource. Same seed + same actions = same run.
//!   - Rendering, persistence, and remote data services are external
//!     collaborators: they read snapshots and issue actions, nothing more.

pub mod action;
pub mod bus;
pub mod campaign;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod field;
pub mod ledger;
pub mod market;
pub mod planner;
pub mod rng;
pub mod snapshot;
pub mod time;
pub mod types;
pub mod weather;

pub use action::{Action, TutorialFlagKey};
pub use config::SimConfig;
pub use engine::FarmEngine;
pub use snapshot::Snapshot;
pub use types::{Crop, FieldId, Tick};
