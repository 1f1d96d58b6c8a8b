use crate::config::Catalog;
use crate::error::{ModForgeError, ModResult};
use crate::module::{Module, ModulePart};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A module record as emitted by the external wire decoder: parallel lists of
/// attribute ids and rolled values, still unresolved against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModule {
    pub uuid: String,
    pub config_id: u32,
    pub quality: u32,
    pub part_ids: Vec<u32>,
    pub part_values: Vec<u32>,
}

/// Resolves a raw record into a `Module` using the catalog mappings.
///
/// Records whose id and value lists disagree in length are truncated to the
/// shorter side rather than rejected; the decoder occasionally emits them and
/// losing one roll beats losing the whole inventory.
pub fn decode_module(raw: &RawModule, catalog: &Catalog) -> Module {
    let count = raw.part_ids.len().min(raw.part_values.len());
    if raw.part_ids.len() != raw.part_values.len() {
        warn!(
            "module {} has {} part ids but {} values; truncating to {}",
            raw.uuid,
            raw.part_ids.len(),
            raw.part_values.len(),
            count
        );
    }

    let parts = raw
        .part_ids
        .iter()
        .zip(raw.part_values.iter())
        .take(count)
        .map(|(&id, &value)| ModulePart {
            id,
            name: catalog
                .attr_names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("Unknown Attribute ({})", id)),
            value,
        })
        .collect();

    Module {
        uuid: raw.uuid.clone(),
        name: catalog
            .module_names
            .get(&raw.config_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown Module ({})", raw.config_id)),
        config_id: raw.config_id,
        quality: raw.quality,
        parts,
    }
}

pub fn decode_modules(raws: &[RawModule], catalog: &Catalog) -> Vec<Module> {
    let modules: Vec<Module> = raws.iter().map(|raw| decode_module(raw, catalog)).collect();
    debug!("decoded {} modules", modules.len());
    modules
}

pub fn load_inventory_json<R: Read>(reader: R) -> ModResult<Vec<RawModule>> {
    Ok(serde_json::from_reader(reader)?)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    uuid: String,
    config_id: u32,
    quality: u32,
    /// Semicolon-separated `attr_id:value` pairs.
    parts: String,
}

pub fn load_inventory_csv<R: Read>(reader: R) -> ModResult<Vec<RawModule>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut raws = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        let mut part_ids = Vec::new();
        let mut part_values = Vec::new();
        for pair in row.parts.split(';').filter(|s| !s.is_empty()) {
            let (id, value) = pair.split_once(':').ok_or_else(|| {
                ModForgeError::Validation(format!(
                    "module {}: malformed part '{}', expected id:value",
                    row.uuid, pair
                ))
            })?;
            part_ids.push(id.trim().parse().map_err(|_| {
                ModForgeError::Validation(format!("module {}: bad part id '{}'", row.uuid, id))
            })?);
            part_values.push(value.trim().parse().map_err(|_| {
                ModForgeError::Validation(format!("module {}: bad part value '{}'", row.uuid, value))
            })?);
        }
        raws.push(RawModule {
            uuid: row.uuid,
            config_id: row.config_id,
            quality: row.quality,
            part_ids,
            part_values,
        });
    }
    Ok(raws)
}

/// Loads an inventory file, dispatching on the extension (.json or .csv).
pub fn load_inventory<P: AsRef<Path>>(path: P) -> ModResult<Vec<RawModule>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_inventory_csv(file),
        Some("json") => load_inventory_json(file),
        other => Err(ModForgeError::Validation(format!(
            "unsupported inventory format '{}' for {}",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}
