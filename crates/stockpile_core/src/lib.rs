//! Side-table overlay attaching stack-limit, refill-threshold and
//! pause-refill attributes to storage configurations owned by a host
//! simulation, with save-format persistence and effective-limit resolution.

mod clipboard;
mod derive;
mod host;
mod overlay;
mod save;

pub use clipboard::SettingsClipboard;
pub use derive::{effective_limit_at, effective_limit_for};
pub use host::{Cell, ItemId, SettingsId, SlotParentId, StorageHost};
pub use overlay::{MAX_LIMIT, NO_LIMIT, OverlayStore, REFILL_FULL};
pub use save::{LoadSaveMode, SavedSettings, capture, expose, restore};
