use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::{Map as JsonMap, Value as JsonValue};
use stockpile_core::{
    Cell, ItemId, NO_LIMIT, OverlayStore, SettingsClipboard, effective_limit_at,
    effective_limit_for,
};
use stockpile_panel::{PanelView, render_text};

mod depot;

use depot::{
    DepotFile, DepotHost, load_store, read_depot, with_store, write_depot, zone_settings_id,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellArg {
    x: i32,
    y: i32,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(value_name = "DEPOT.JSON")]
    path: PathBuf,
    /// Zone selected for field output, panel rendering and edits.
    #[arg(long, value_name = "NAME")]
    zone: Option<String>,
    #[arg(long)]
    limit: bool,
    #[arg(long)]
    refill: bool,
    #[arg(long)]
    paused: bool,
    #[arg(long = "limit-at", value_name = "X,Y", value_parser = parse_cell)]
    limit_at: Option<CellArg>,
    #[arg(long = "limit-for", value_name = "ITEM_INDEX")]
    limit_for: Option<usize>,
    #[arg(long)]
    panel: bool,
    #[arg(long)]
    json: bool,
    #[arg(long = "set-limit", value_name = "N", allow_hyphen_values = true)]
    set_limit: Option<i32>,
    #[arg(long = "set-refill", value_name = "PERCENT")]
    set_refill: Option<i32>,
    #[arg(long = "set-paused", value_name = "true|false")]
    set_paused: Option<bool>,
    #[arg(long = "copy-from", value_name = "ZONE", requires = "paste_into")]
    copy_from: Option<String>,
    #[arg(long = "paste-into", value_name = "ZONE", requires = "copy_from")]
    paste_into: Option<String>,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long = "force-overwrite")]
    force_overwrite: bool,
    #[arg(long)]
    backup: bool,
}

fn main() {
    let cli = Cli::parse();

    let has_zone_edits =
        cli.set_limit.is_some() || cli.set_refill.is_some() || cli.set_paused.is_some();
    let has_edits = has_zone_edits || cli.paste_into.is_some();
    let zone_required = has_zone_edits || cli.limit || cli.refill || cli.paused || cli.panel;

    if has_edits && cli.output.is_none() {
        eprintln!("--set-*/--paste-into flags require --output <PATH>");
        process::exit(2);
    }
    if !has_edits && cli.output.is_some() {
        eprintln!("--output requires at least one editing flag");
        process::exit(2);
    }
    if zone_required && cli.zone.is_none() {
        eprintln!("--zone <NAME> is required for zone fields and edits");
        process::exit(2);
    }

    let file = read_depot(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error loading depot {}:", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    let selected = cli.zone.as_deref().map(|name| {
        file.zone_index(name).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        })
    });
    if let Some(index) = cli.limit_for
        && index >= file.items.len()
    {
        eprintln!(
            "Error: item index {index} out of range (depot has {} items)",
            file.items.len()
        );
        process::exit(1);
    }

    let mut store = load_store(&file);
    let mut host = DepotHost::new(&file);

    if let Some(index) = selected {
        let settings = zone_settings_id(index);
        if let Some(value) = cli.set_limit {
            store.set_limit_notifying(settings, value, &mut host);
        }
        if let Some(value) = cli.set_refill {
            store.set_refill_percent(settings, value);
        }
        if let Some(paused) = cli.set_paused {
            store.set_refill_paused(settings, paused);
        }
    }

    if let (Some(from), Some(into)) = (cli.copy_from.as_deref(), cli.paste_into.as_deref()) {
        let from = file.zone_index(from).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        let into = file.zone_index(into).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });

        let mut clipboard = SettingsClipboard::new();
        clipboard.copy_from(&store, zone_settings_id(from));
        clipboard.paste_into(&mut store, zone_settings_id(into), &mut host);
    }

    // Change notifications go to stderr so machine-readable stdout stays clean.
    for settings in &host.notified {
        eprintln!("changed: {}", file.zones[settings.raw() as usize].name);
    }

    if has_edits {
        let out_path = cli.output.as_ref().expect("checked above");
        if out_path.exists() {
            if !cli.force_overwrite {
                eprintln!(
                    "refusing to overwrite existing file {} (use --force-overwrite)",
                    out_path.display()
                );
                process::exit(1);
            }
            if cli.backup {
                let backup_path = PathBuf::from(format!("{}.bak", out_path.to_string_lossy()));
                fs::copy(out_path, &backup_path).unwrap_or_else(|e| {
                    eprintln!("Error creating backup {}: {e}", backup_path.display());
                    process::exit(1);
                });
            }
        }
        write_depot(out_path, &with_store(&file, &store)).unwrap_or_else(|e| {
            eprintln!("Error writing depot: {e}");
            process::exit(1);
        });
    }

    if cli.panel {
        let index = selected.expect("checked above");
        print!(
            "{}",
            render_text(&PanelView::read(&store, zone_settings_id(index)))
        );
        return;
    }

    let field_mode =
        cli.limit || cli.refill || cli.paused || cli.limit_at.is_some() || cli.limit_for.is_some();

    if field_mode {
        let pairs = field_pairs(&cli, &store, &host, selected);
        if cli.json {
            let mut out = JsonMap::new();
            for (key, value) in pairs {
                out.insert(key.to_string(), value);
            }
            print_json(JsonValue::Object(out));
        } else {
            for (key, value) in pairs {
                println!("{key}={}", render_scalar(&value));
            }
        }
        return;
    }

    if cli.json {
        print_json(JsonValue::Object(summary_json(&file, &store)));
        return;
    }

    if let Some(out_path) = cli.output.as_ref() {
        println!("Wrote edited depot to {}", out_path.display());
        return;
    }

    print_depot_sheet(&file, &store);
}

// ---------------------------------------------------------------------------
// Field output
// ---------------------------------------------------------------------------

fn field_pairs(
    cli: &Cli,
    store: &OverlayStore,
    host: &DepotHost<'_>,
    selected: Option<usize>,
) -> Vec<(&'static str, JsonValue)> {
    let mut out = Vec::new();

    if let Some(index) = selected {
        let settings = zone_settings_id(index);
        if cli.limit {
            out.push(("limit", JsonValue::from(store.limit(settings))));
        }
        if cli.refill {
            out.push(("refill", JsonValue::from(store.refill_percent(settings))));
        }
        if cli.paused {
            out.push(("paused", JsonValue::Bool(store.is_refill_paused(settings))));
        }
    }
    if let Some(cell) = cli.limit_at {
        let limit = effective_limit_at(store, host, Cell::new(cell.x, cell.y));
        out.push(("limit_at", JsonValue::from(limit)));
    }
    if let Some(index) = cli.limit_for {
        let limit = effective_limit_for(store, host, ItemId::new(index as u64));
        out.push(("limit_for", JsonValue::from(limit)));
    }

    out
}

fn render_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_json(value: JsonValue) {
    let rendered = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

// ---------------------------------------------------------------------------
// Depot summary
// ---------------------------------------------------------------------------

fn summary_json(file: &DepotFile, store: &OverlayStore) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert(
        "kinds".to_string(),
        JsonValue::Array(
            file.kinds
                .iter()
                .map(|kind| {
                    let mut m = JsonMap::new();
                    m.insert("name".to_string(), JsonValue::String(kind.name.clone()));
                    m.insert("stack_limit".to_string(), JsonValue::from(kind.stack_limit));
                    JsonValue::Object(m)
                })
                .collect(),
        ),
    );
    out.insert(
        "zones".to_string(),
        JsonValue::Array(
            file.zones
                .iter()
                .enumerate()
                .map(|(index, zone)| {
                    let settings = zone_settings_id(index);
                    let mut m = JsonMap::new();
                    m.insert("name".to_string(), JsonValue::String(zone.name.clone()));
                    m.insert("cells".to_string(), JsonValue::from(zone.cells.len()));
                    m.insert("limit".to_string(), JsonValue::from(store.limit(settings)));
                    m.insert(
                        "refill".to_string(),
                        JsonValue::from(store.refill_percent(settings)),
                    );
                    m.insert(
                        "paused".to_string(),
                        JsonValue::Bool(store.is_refill_paused(settings)),
                    );
                    JsonValue::Object(m)
                })
                .collect(),
        ),
    );
    out.insert("items".to_string(), JsonValue::from(file.items.len()));

    out
}

fn print_depot_sheet(file: &DepotFile, store: &OverlayStore) {
    println!(
        "DEPOT: {} zones, {} kinds, {} items",
        file.zones.len(),
        file.kinds.len(),
        file.items.len()
    );
    println!();
    println!(
        "{:<16}{:<12}{:<24}{:<8}{}",
        "Zone", "Limit", "Refill", "Paused", "Cells"
    );
    for (index, zone) in file.zones.iter().enumerate() {
        let settings = zone_settings_id(index);
        let limit = store.limit(settings);
        let limit_text = if limit == NO_LIMIT {
            "No limit".to_string()
        } else {
            limit.to_string()
        };
        let refill = store.refill_percent(settings);
        println!(
            "{:<16}{:<12}{:<24}{:<8}{}",
            zone.name,
            limit_text,
            format!("{refill}% ({})", stockpile_panel::refill_label(refill)),
            if store.is_refill_paused(settings) {
                "yes"
            } else {
                "no"
            },
            zone.cells.len()
        );
    }
    if !file.kinds.is_empty() {
        println!();
        let kinds: Vec<String> = file
            .kinds
            .iter()
            .map(|kind| format!("{} ({})", kind.name, kind.stack_limit))
            .collect();
        println!("Kinds: {}", kinds.join(", "));
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn parse_cell(value: &str) -> Result<CellArg, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("invalid cell '{value}', expected X,Y"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid cell x '{x}': {e}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid cell y '{y}': {e}"))?;
    Ok(CellArg { x, y })
}
