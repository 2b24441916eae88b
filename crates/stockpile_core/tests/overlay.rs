use stockpile_core::{
    Cell, ItemId, MAX_LIMIT, NO_LIMIT, OverlayStore, REFILL_FULL, SettingsId, SlotParentId,
    StorageHost,
};

#[derive(Debug, Default)]
struct CountingHost {
    notified: Vec<SettingsId>,
}

impl StorageHost for CountingHost {
    fn slot_parent_at(&self, _cell: Cell) -> Option<SlotParentId> {
        None
    }

    fn parent_settings(&self, parent: SlotParentId) -> SettingsId {
        SettingsId::new(parent.raw())
    }

    fn item_slot_parent(&self, _item: ItemId) -> Option<SlotParentId> {
        None
    }

    fn item_stack_limit(&self, _item: ItemId) -> i32 {
        MAX_LIMIT
    }

    fn settings_changed(&mut self, settings: SettingsId) {
        self.notified.push(settings);
    }
}

#[test]
fn untouched_settings_resolve_to_defaults() {
    let store = OverlayStore::new();
    let s = SettingsId::new(1);

    assert_eq!(store.limit(s), NO_LIMIT);
    assert_eq!(store.try_limit(s), None);
    assert_eq!(store.refill_percent(s), REFILL_FULL);
    assert!(!store.is_refill_paused(s));
    assert!(!store.is_tracked(s));
}

#[test]
fn set_limit_stores_and_reads_back() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    for v in [0, 1, 5, MAX_LIMIT] {
        store.set_limit(s, v);
        assert_eq!(store.limit(s), v);
        assert_eq!(store.try_limit(s), Some(v));
    }
}

#[test]
fn set_limit_to_sentinel_removes_the_entry() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    store.set_limit(s, 7);
    assert!(store.is_tracked(s));

    store.set_limit(s, NO_LIMIT);
    assert_eq!(store.try_limit(s), None);
    assert!(!store.is_tracked(s));
}

#[test]
fn limit_or_prefers_stored_value_over_fallback() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    assert_eq!(store.limit_or(s, 75), 75);
    store.set_limit(s, 3);
    assert_eq!(store.limit_or(s, 75), 3);
    store.set_limit(s, NO_LIMIT);
    assert_eq!(store.limit_or(s, 75), 75);
}

#[test]
fn stored_zero_limit_wins_over_fallback() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    store.set_limit(s, 0);
    assert_eq!(store.limit_or(s, 75), 0);
}

#[test]
fn refill_percent_full_removes_the_entry() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    store.set_refill_percent(s, 50);
    assert_eq!(store.refill_percent(s), 50);
    assert!(store.is_tracked(s));

    store.set_refill_percent(s, REFILL_FULL);
    assert_eq!(store.refill_percent(s), REFILL_FULL);
    assert!(!store.is_tracked(s));
}

#[test]
fn refill_pause_round_trips_to_untracked() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);

    store.set_refill_paused(s, true);
    assert!(store.is_refill_paused(s));
    assert!(store.is_tracked(s));

    store.set_refill_paused(s, false);
    assert!(!store.is_refill_paused(s));
    assert!(!store.is_tracked(s));
}

#[test]
fn notifying_setter_fires_when_tightening_a_stored_limit() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let s = SettingsId::new(1);

    store.set_limit(s, 5);
    store.set_limit_notifying(s, 2, &mut host);

    assert_eq!(store.limit(s), 2);
    assert_eq!(host.notified, vec![s]);
}

#[test]
fn notifying_setter_stays_quiet_when_loosening() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let s = SettingsId::new(1);

    store.set_limit(s, 5);
    store.set_limit_notifying(s, 10, &mut host);

    assert_eq!(store.limit(s), 10);
    assert!(host.notified.is_empty());
}

#[test]
fn notifying_setter_treats_absent_limit_as_max() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let s = SettingsId::new(1);

    store.set_limit_notifying(s, 5, &mut host);
    assert_eq!(store.limit(s), 5);
    assert_eq!(host.notified, vec![s]);

    store.set_limit_notifying(s, MAX_LIMIT, &mut host);
    assert_eq!(host.notified.len(), 1);
}

#[test]
fn notifying_setter_with_sentinel_removes_without_notifying() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let s = SettingsId::new(1);

    store.set_limit(s, 5);
    store.set_limit_notifying(s, NO_LIMIT, &mut host);

    assert_eq!(store.try_limit(s), None);
    assert!(host.notified.is_empty());
}

#[test]
fn forget_clears_every_attribute() {
    let mut store = OverlayStore::new();
    let s = SettingsId::new(1);
    let other = SettingsId::new(2);

    store.set_limit(s, 5);
    store.set_refill_percent(s, 50);
    store.set_refill_paused(s, true);
    store.set_limit(other, 9);

    store.forget(s);

    assert!(!store.is_tracked(s));
    assert_eq!(store.limit(s), NO_LIMIT);
    assert_eq!(store.refill_percent(s), REFILL_FULL);
    assert!(!store.is_refill_paused(s));
    assert_eq!(store.limit(other), 9);
}

#[test]
fn attributes_are_stored_per_settings_identity() {
    let mut store = OverlayStore::new();
    let a = SettingsId::new(1);
    let b = SettingsId::new(2);

    store.set_limit(a, 5);
    store.set_refill_percent(b, 25);

    assert_eq!(store.limit(b), NO_LIMIT);
    assert_eq!(store.refill_percent(a), REFILL_FULL);
    assert_eq!(store.limit(a), 5);
    assert_eq!(store.refill_percent(b), 25);
}
