use serde::{Deserialize, Serialize};

/// Identity of one storage-filter configuration. Allocated by the host;
/// equality and hashing are on the handle itself, never on settings contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettingsId(u64);

impl SettingsId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A zone or building that owns a storage configuration and claims cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotParentId(u64);

impl SlotParentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A stackable thing lying somewhere on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The seam toward the simulation that owns configurations, zones and items.
///
/// Lookups mirror what the hauling side of a colony sim exposes: which slot
/// parent (if any) claims a cell, which configuration a slot parent carries,
/// where an item currently rests, and the intrinsic per-kind stack size.
/// `settings_changed` is the change-notification hook; it fires when a limit
/// tightens so the host can re-check existing placements against the new bound.
pub trait StorageHost {
    fn slot_parent_at(&self, cell: Cell) -> Option<SlotParentId>;

    fn parent_settings(&self, parent: SlotParentId) -> SettingsId;

    /// Slot parent the item is currently stored under, if any.
    fn item_slot_parent(&self, item: ItemId) -> Option<SlotParentId>;

    /// Intrinsic stack size of the item's kind.
    fn item_stack_limit(&self, item: ItemId) -> i32;

    fn settings_changed(&mut self, settings: SettingsId);
}
