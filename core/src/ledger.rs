//! Inventory & ledger — harvested-crop quantities and the credits
//! balance. Harvest and sale are atomic value transfers: both sides
//! of the transfer land in the same snapshot replacement.

use crate::{
    snapshot::{round2, Snapshot},
    types::Crop,
};

/// Clamp a sale request to the held quantity. A request of 0 means
/// "sell everything". Returns 0 when nothing can be sold.
pub fn sellable_amount(snapshot: &Snapshot, crop: Crop, requested: u32) -> u32 {
    let available = snapshot.quantity(crop);
    let wanted = if requested > 0 { requested } else { available };
    wanted.min(available)
}

/// Execute a sale on a snapshot already cloned by the caller.
/// Guard (`sellable_amount > 0`) must have been checked.
pub fn sell(snapshot: &mut Snapshot, crop: Crop, amount: u32) {
    debug_assert!(amount > 0 && amount <= snapshot.quantity(crop));
    let price = snapshot.price(crop);
    *snapshot.inventory.entry(crop).or_insert(0) -= amount;
    snapshot.resources.credits = round2(snapshot.resources.credits + price * amount as f64);
    snapshot.tutorial.sold = true;
    log::debug!(
        "sold {amount} {} at {price:.1} -> credits {:.2}",
        crop.name(),
        snapshot.resources.credits
    );
}

/// Credit a harvest into the inventory.
pub fn store_harvest(snapshot: &mut Snapshot, crop: Crop, amount: u32) {
    *snapshot.inventory.entry(crop).or_insert(0) += amount;
    snapshot.tutorial.harvested = true;
}
