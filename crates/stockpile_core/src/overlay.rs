use std::collections::{HashMap, HashSet};

use crate::host::{SettingsId, StorageHost};

/// Sentinel for "no explicit limit".
pub const NO_LIMIT: i32 = -1;
/// Hard ceiling used when nothing else bounds a stack.
pub const MAX_LIMIT: i32 = 99_999;
/// Refill threshold meaning "refill whenever not full".
pub const REFILL_FULL: i32 = 100;

/// Side tables attaching extra attributes to host-owned storage
/// configurations.
///
/// Each attribute is stored independently and only while it differs from its
/// default: a configuration with no entries behaves as
/// `{limit: NO_LIMIT, refill_percent: REFILL_FULL, refill_paused: false}`.
/// Writing the default back removes the entry.
#[derive(Debug, Default, Clone)]
pub struct OverlayStore {
    limits: HashMap<SettingsId, i32>,
    refill_percents: HashMap<SettingsId, i32>,
    refill_paused: HashSet<SettingsId>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(&self, settings: SettingsId) -> i32 {
        self.limit_or(settings, NO_LIMIT)
    }

    pub fn try_limit(&self, settings: SettingsId) -> Option<i32> {
        self.limits.get(&settings).copied()
    }

    pub fn limit_or(&self, settings: SettingsId, fallback: i32) -> i32 {
        self.try_limit(settings).unwrap_or(fallback)
    }

    pub fn set_limit(&mut self, settings: SettingsId, limit: i32) {
        if limit < 0 {
            self.limits.remove(&settings);
        } else {
            self.limits.insert(settings, limit);
        }
    }

    /// As `set_limit`, but tells the host first when the limit tightens.
    ///
    /// The previous effective value is the stored limit, or `MAX_LIMIT` when
    /// none is stored; storing the sentinel only removes the entry and never
    /// notifies (the bound can only loosen).
    pub fn set_limit_notifying(
        &mut self,
        settings: SettingsId,
        limit: i32,
        host: &mut dyn StorageHost,
    ) {
        if limit == NO_LIMIT {
            self.limits.remove(&settings);
            return;
        }
        if limit < self.limit_or(settings, MAX_LIMIT) {
            host.settings_changed(settings);
        }
        self.set_limit(settings, limit);
    }

    pub fn refill_percent(&self, settings: SettingsId) -> i32 {
        self.refill_percents
            .get(&settings)
            .copied()
            .unwrap_or(REFILL_FULL)
    }

    pub fn set_refill_percent(&mut self, settings: SettingsId, percent: i32) {
        if percent < REFILL_FULL {
            self.refill_percents.insert(settings, percent);
        } else {
            self.refill_percents.remove(&settings);
        }
    }

    pub fn is_refill_paused(&self, settings: SettingsId) -> bool {
        self.refill_paused.contains(&settings)
    }

    pub fn set_refill_paused(&mut self, settings: SettingsId, paused: bool) {
        if paused {
            self.refill_paused.insert(settings);
        } else {
            self.refill_paused.remove(&settings);
        }
    }

    /// Drops every stored attribute for `settings`.
    ///
    /// The host must call this when it destroys a configuration, otherwise
    /// entries for dead configurations accumulate for the life of the store.
    pub fn forget(&mut self, settings: SettingsId) {
        self.limits.remove(&settings);
        self.refill_percents.remove(&settings);
        self.refill_paused.remove(&settings);
    }

    /// True while any non-default attribute is stored for `settings`.
    pub fn is_tracked(&self, settings: SettingsId) -> bool {
        self.limits.contains_key(&settings)
            || self.refill_percents.contains_key(&settings)
            || self.refill_paused.contains(&settings)
    }
}
