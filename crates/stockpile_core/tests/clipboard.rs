use stockpile_core::{
    Cell, ItemId, MAX_LIMIT, NO_LIMIT, OverlayStore, REFILL_FULL, SettingsClipboard, SettingsId,
    SlotParentId, StorageHost,
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
fn fresh_clipboard_holds_defaults() {
    let clipboard = SettingsClipboard::new();
    assert_eq!(clipboard.limit(), NO_LIMIT);
    assert_eq!(clipboard.refill_percent(), REFILL_FULL);
}

#[test]
fn paste_applies_copied_limit_and_refill_and_notifies_on_tighten() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let source = SettingsId::new(1);
    let target = SettingsId::new(2);

    store.set_limit(source, 3);
    store.set_refill_percent(source, 50);
    store.set_limit(target, 20);

    let mut clipboard = SettingsClipboard::new();
    clipboard.copy_from(&store, source);
    clipboard.paste_into(&mut store, target, &mut host);

    assert_eq!(store.limit(target), 3);
    assert_eq!(store.refill_percent(target), 50);
    assert_eq!(host.notified, vec![target]);
}

#[test]
fn paste_of_default_settings_clears_the_target_limit_quietly() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let source = SettingsId::new(1);
    let target = SettingsId::new(2);

    store.set_limit(target, 20);
    store.set_refill_percent(target, 40);

    let mut clipboard = SettingsClipboard::new();
    clipboard.copy_from(&store, source);
    clipboard.paste_into(&mut store, target, &mut host);

    assert_eq!(store.try_limit(target), None);
    assert_eq!(store.refill_percent(target), REFILL_FULL);
    assert!(host.notified.is_empty());
}

#[test]
fn last_copy_wins() {
    let mut store = OverlayStore::new();
    let a = SettingsId::new(1);
    let b = SettingsId::new(2);
    store.set_limit(a, 3);
    store.set_limit(b, 8);

    let mut clipboard = SettingsClipboard::new();
    clipboard.copy_from(&store, a);
    clipboard.copy_from(&store, b);

    assert_eq!(clipboard.limit(), 8);
}

#[test]
fn pause_flag_is_not_staged() {
    let mut store = OverlayStore::new();
    let mut host = CountingHost::default();
    let source = SettingsId::new(1);
    let target = SettingsId::new(2);

    store.set_refill_paused(source, true);

    let mut clipboard = SettingsClipboard::new();
    clipboard.copy_from(&store, source);
    clipboard.paste_into(&mut store, target, &mut host);

    assert!(!store.is_refill_paused(target));
}
