use crate::host::{SettingsId, StorageHost};
use crate::overlay::{NO_LIMIT, OverlayStore, REFILL_FULL};

/// Single-slot staging buffer for "copy settings" / "paste settings".
///
/// One instance lives for the whole session; each copy overwrites the last.
/// The pause flag is not staged, matching the host's native clipboard which
/// only carries filter settings the overlay extends with limit and refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsClipboard {
    limit: i32,
    refill_percent: i32,
}

impl Default for SettingsClipboard {
    fn default() -> Self {
        Self {
            limit: NO_LIMIT,
            refill_percent: REFILL_FULL,
        }
    }
}

impl SettingsClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    pub fn refill_percent(&self) -> i32 {
        self.refill_percent
    }

    pub fn copy_from(&mut self, store: &OverlayStore, settings: SettingsId) {
        self.limit = store.limit(settings);
        self.refill_percent = store.refill_percent(settings);
    }

    /// Applies the staged values. The limit goes through the notifying setter
    /// so pasting a tighter bound re-triggers placement checks, exactly as an
    /// interactive edit would.
    pub fn paste_into(
        &self,
        store: &mut OverlayStore,
        settings: SettingsId,
        host: &mut dyn StorageHost,
    ) {
        store.set_limit_notifying(settings, self.limit, host);
        store.set_refill_percent(settings, self.refill_percent);
    }
}
