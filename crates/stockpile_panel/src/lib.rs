//! Toolkit-agnostic model of the storage-settings editor panel: three
//! controls bound 1:1 to the overlay store, quick-pick presets plus free-form
//! entry, and a plain-text rendering for terminal shells.

use std::fmt::Write as _;

use stockpile_core::{MAX_LIMIT, NO_LIMIT, OverlayStore, REFILL_FULL, SettingsId, StorageHost};

/// Quick-pick choices for the limit control.
pub const LIMIT_PRESETS: [(i32, &str); 6] = [
    (NO_LIMIT, "No limit"),
    (0, "0"),
    (1, "1"),
    (2, "2"),
    (5, "5"),
    (10, "10"),
];

/// Quick-pick choices for the refill-threshold control.
pub const REFILL_PRESETS: [(i32, &str); 3] = [
    (REFILL_FULL, "When not full"),
    (50, "Below half"),
    (0, "Only when empty"),
];

pub const CUSTOM_LABEL: &str = "Custom";

/// Menu label for a limit value, `Custom` when off the preset list.
pub fn limit_label(limit: i32) -> &'static str {
    LIMIT_PRESETS
        .iter()
        .find(|(value, _)| *value == limit)
        .map(|(_, label)| *label)
        .unwrap_or(CUSTOM_LABEL)
}

/// Menu label for a refill threshold, `Custom` when off the preset list.
pub fn refill_label(percent: i32) -> &'static str {
    REFILL_PRESETS
        .iter()
        .find(|(value, _)| *value == percent)
        .map(|(_, label)| *label)
        .unwrap_or(CUSTOM_LABEL)
}

/// Snapshot of the three controls for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    pub limit: i32,
    pub limit_label: &'static str,
    pub refill_percent: i32,
    pub refill_label: &'static str,
    pub refill_paused: bool,
}

impl PanelView {
    pub fn read(store: &OverlayStore, settings: SettingsId) -> Self {
        let limit = store.limit(settings);
        let refill_percent = store.refill_percent(settings);
        Self {
            limit,
            limit_label: limit_label(limit),
            refill_percent,
            refill_label: refill_label(refill_percent),
            refill_paused: store.is_refill_paused(settings),
        }
    }
}

/// One interaction with the panel.
///
/// Picks come from the preset menus; entries from the numeric fields, which
/// clamp to the control's range before touching the store. Limit edits go
/// through the notifying setter so tightening re-checks placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    PickLimit(i32),
    EnterLimit(i32),
    PickRefill(i32),
    EnterRefill(i32),
    SetPaused(bool),
}

pub fn apply(
    input: PanelInput,
    store: &mut OverlayStore,
    settings: SettingsId,
    host: &mut dyn StorageHost,
) {
    match input {
        PanelInput::PickLimit(value) => store.set_limit_notifying(settings, value, host),
        PanelInput::EnterLimit(value) => {
            store.set_limit_notifying(settings, value.clamp(NO_LIMIT, MAX_LIMIT), host)
        }
        PanelInput::PickRefill(value) => store.set_refill_percent(settings, value),
        PanelInput::EnterRefill(value) => {
            store.set_refill_percent(settings, value.clamp(0, REFILL_FULL))
        }
        PanelInput::SetPaused(paused) => store.set_refill_paused(settings, paused),
    }
}

/// Renders the panel as three fixed lines of text.
pub fn render_text(view: &PanelView) -> String {
    let mut out = String::new();
    if view.limit_label == CUSTOM_LABEL {
        let _ = writeln!(out, "Limit stacks to: {} ({})", CUSTOM_LABEL, view.limit);
    } else {
        let _ = writeln!(out, "Limit stacks to: {}", view.limit_label);
    }
    let _ = writeln!(
        out,
        "Refill at: {}% ({})",
        view.refill_percent, view.refill_label
    );
    let _ = writeln!(
        out,
        "Pause refill: {}",
        if view.refill_paused { "yes" } else { "no" }
    );
    out
}
