use crate::host::{Cell, ItemId, StorageHost};
use crate::overlay::{MAX_LIMIT, OverlayStore};

/// Effective stack limit for a map cell.
///
/// Resolution order: overlay limit on the cell's configuration, then
/// `MAX_LIMIT`. A cell outside any storage zone resolves to `MAX_LIMIT`.
pub fn effective_limit_at(store: &OverlayStore, host: &dyn StorageHost, cell: Cell) -> i32 {
    match host.slot_parent_at(cell) {
        Some(parent) => store.limit_or(host.parent_settings(parent), MAX_LIMIT),
        None => MAX_LIMIT,
    }
}

/// Effective stack limit for an item where it currently rests.
///
/// Resolution order: overlay limit on the enclosing configuration, then the
/// item kind's intrinsic stack size. An item outside any storage zone keeps
/// its intrinsic stack size.
pub fn effective_limit_for(store: &OverlayStore, host: &dyn StorageHost, item: ItemId) -> i32 {
    let fallback = host.item_stack_limit(item);
    match host.item_slot_parent(item) {
        Some(parent) => store.limit_or(host.parent_settings(parent), fallback),
        None => fallback,
    }
}
