use serde::{Deserialize, Serialize};

use crate::host::SettingsId;
use crate::overlay::{NO_LIMIT, OverlayStore, REFILL_FULL};

/// Phase of the host's generic save/load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSaveMode {
    Inactive,
    Saving,
    LoadingVars,
    ResolvingRefs,
    PostLoadInit,
}

/// Wire shape of the overlay attributes inside a saved configuration.
///
/// Field names match the persisted format; every field is omitted while it
/// holds its default, so an untouched configuration contributes no fields at
/// all and absent fields read back as defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSettings {
    #[serde(
        rename = "stacklimit",
        default = "default_limit",
        skip_serializing_if = "is_default_limit"
    )]
    pub stack_limit: i32,
    #[serde(
        rename = "refillpercent",
        default = "default_refill",
        skip_serializing_if = "is_default_refill"
    )]
    pub refill_percent: i32,
    #[serde(
        rename = "refillingdisabled",
        default,
        skip_serializing_if = "is_false"
    )]
    pub refilling_disabled: bool,
}

impl Default for SavedSettings {
    fn default() -> Self {
        Self {
            stack_limit: NO_LIMIT,
            refill_percent: REFILL_FULL,
            refilling_disabled: false,
        }
    }
}

impl SavedSettings {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn default_limit() -> i32 {
    NO_LIMIT
}

fn is_default_limit(limit: &i32) -> bool {
    *limit <= NO_LIMIT
}

fn default_refill() -> i32 {
    REFILL_FULL
}

fn is_default_refill(percent: &i32) -> bool {
    *percent >= REFILL_FULL
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Reads the overlay attributes for `settings` into their wire shape.
pub fn capture(store: &OverlayStore, settings: SettingsId) -> SavedSettings {
    SavedSettings {
        stack_limit: store.limit(settings),
        refill_percent: store.refill_percent(settings),
        refilling_disabled: store.is_refill_paused(settings),
    }
}

/// Applies saved attributes into the store for the configuration being
/// loaded. Goes through the plain setters: loading never raises the host's
/// change notification.
pub fn restore(store: &mut OverlayStore, settings: SettingsId, saved: &SavedSettings) {
    store.set_limit(settings, saved.stack_limit);
    store.set_refill_percent(settings, saved.refill_percent);
    store.set_refill_paused(settings, saved.refilling_disabled);
}

/// Save/load hook for one configuration, driven by the host's object
/// lifecycle. Only `Saving` and `LoadingVars` do anything.
pub fn expose(
    store: &mut OverlayStore,
    settings: SettingsId,
    mode: LoadSaveMode,
    node: &mut SavedSettings,
) {
    match mode {
        LoadSaveMode::Saving => *node = capture(store, settings),
        LoadSaveMode::LoadingVars => restore(store, settings, node),
        LoadSaveMode::Inactive | LoadSaveMode::ResolvingRefs | LoadSaveMode::PostLoadInit => {}
    }
}
