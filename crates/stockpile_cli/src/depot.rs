use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use stockpile_core::{
    Cell, ItemId, MAX_LIMIT, OverlayStore, SavedSettings, SettingsId, SlotParentId, StorageHost,
    capture, restore,
};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepotErrorCode {
    Io,
    Parse,
    UnknownZone,
    UnknownKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepotError {
    pub code: DepotErrorCode,
    pub message: String,
}

impl DepotError {
    pub fn new(code: DepotErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DepotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for DepotError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindSpec {
    pub name: String,
    pub stack_limit: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSpec {
    pub name: String,
    #[serde(default)]
    pub cells: Vec<[i32; 2]>,
    #[serde(default, skip_serializing_if = "SavedSettings::is_default")]
    pub settings: SavedSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub kind: String,
    pub cell: [i32; 2],
}

/// On-disk shape of a depot: item kinds with intrinsic stack sizes, storage
/// zones carrying saved overlay settings, and loose items on the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepotFile {
    #[serde(default)]
    pub kinds: Vec<KindSpec>,
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl DepotFile {
    pub fn zone_index(&self, name: &str) -> Result<usize, DepotError> {
        self.zones
            .iter()
            .position(|zone| zone.name == name)
            .ok_or_else(|| {
                DepotError::new(DepotErrorCode::UnknownZone, format!("no zone named '{name}'"))
            })
    }

    pub fn kind(&self, name: &str) -> Result<&KindSpec, DepotError> {
        self.kinds
            .iter()
            .find(|kind| kind.name == name)
            .ok_or_else(|| {
                DepotError::new(DepotErrorCode::UnknownKind, format!("no kind named '{name}'"))
            })
    }

    /// Every item must reference a declared kind.
    pub fn validate(&self) -> Result<(), DepotError> {
        for item in &self.items {
            self.kind(&item.kind)?;
        }
        Ok(())
    }
}

/// Zone index doubles as the settings identity and the slot-parent identity.
pub fn zone_settings_id(zone_index: usize) -> SettingsId {
    SettingsId::new(zone_index as u64)
}

/// Loads every zone's saved settings into a fresh overlay store.
pub fn load_store(file: &DepotFile) -> OverlayStore {
    let mut store = OverlayStore::new();
    for (index, zone) in file.zones.iter().enumerate() {
        restore(&mut store, zone_settings_id(index), &zone.settings);
    }
    store
}

/// Clones the depot with each zone's settings captured back from the store.
pub fn with_store(file: &DepotFile, store: &OverlayStore) -> DepotFile {
    let mut out = file.clone();
    for (index, zone) in out.zones.iter_mut().enumerate() {
        zone.settings = capture(store, zone_settings_id(index));
    }
    out
}

/// The demo host: lookups over the depot file, plus a record of which
/// configurations were notified as changed.
#[derive(Debug)]
pub struct DepotHost<'a> {
    file: &'a DepotFile,
    pub notified: Vec<SettingsId>,
}

impl<'a> DepotHost<'a> {
    pub fn new(file: &'a DepotFile) -> Self {
        Self {
            file,
            notified: Vec::new(),
        }
    }
}

impl StorageHost for DepotHost<'_> {
    fn slot_parent_at(&self, cell: Cell) -> Option<SlotParentId> {
        self.file
            .zones
            .iter()
            .position(|zone| zone.cells.contains(&[cell.x, cell.y]))
            .map(|index| SlotParentId::new(index as u64))
    }

    fn parent_settings(&self, parent: SlotParentId) -> SettingsId {
        SettingsId::new(parent.raw())
    }

    fn item_slot_parent(&self, item: ItemId) -> Option<SlotParentId> {
        let spec = self.file.items.get(item.raw() as usize)?;
        self.slot_parent_at(Cell::new(spec.cell[0], spec.cell[1]))
    }

    fn item_stack_limit(&self, item: ItemId) -> i32 {
        self.file
            .items
            .get(item.raw() as usize)
            .and_then(|spec| self.file.kinds.iter().find(|kind| kind.name == spec.kind))
            .map(|kind| kind.stack_limit)
            .unwrap_or(MAX_LIMIT)
    }

    fn settings_changed(&mut self, settings: SettingsId) {
        self.notified.push(settings);
    }
}

/// Reads a depot file; gzip-compressed input is detected by magic bytes.
pub fn read_depot(path: &Path) -> Result<DepotFile, DepotError> {
    let bytes = fs::read(path).map_err(|e| {
        DepotError::new(
            DepotErrorCode::Io,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;

    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| {
                DepotError::new(
                    DepotErrorCode::Parse,
                    format!("failed to decompress {}: {e}", path.display()),
                )
            })?;
        decoded
    } else {
        bytes
    };

    let file: DepotFile = serde_json::from_slice(&bytes).map_err(|e| {
        DepotError::new(
            DepotErrorCode::Parse,
            format!("failed to parse {}: {e}", path.display()),
        )
    })?;
    file.validate()?;
    Ok(file)
}

/// Writes a depot file; a `.gz` extension selects gzip output.
pub fn write_depot(path: &Path, file: &DepotFile) -> Result<(), DepotError> {
    let json = serde_json::to_vec_pretty(file).map_err(|e| {
        DepotError::new(DepotErrorCode::Parse, format!("failed to serialize depot: {e}"))
    })?;

    let bytes = if path.extension().is_some_and(|ext| ext == "gz") {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).and_then(|_| encoder.finish()).map_err(|e| {
            DepotError::new(DepotErrorCode::Io, format!("failed to compress depot: {e}"))
        })?
    } else {
        json
    };

    fs::write(path, bytes).map_err(|e| {
        DepotError::new(
            DepotErrorCode::Io,
            format!("failed to write {}: {e}", path.display()),
        )
    })
}
