use super::Dataset;
use crate::asset::AssetConfig;
use crate::error::{Result, StatsError};
use crate::model::{Player, TraitCategoryMap, KNOWN_COLUMNS};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Header pandas writes for an exported index column
const INDEX_HEADER: &str = "Unnamed: 0";

/// Positions of the typed columns within a record
struct ColumnIndices {
    id: usize,
    name: usize,
    age: usize,
    photo: usize,
    nationality: usize,
    overall: usize,
    potential: usize,
    club: usize,
    value: usize,
    wage: usize,
    preferred_foot: usize,
    position: usize,
}

fn find_required_columns(headers: &StringRecord) -> Result<ColumnIndices> {
    let find = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
    };

    Ok(ColumnIndices {
        id: find("ID")?,
        name: find("Name")?,
        age: find("Age")?,
        photo: find("Photo")?,
        nationality: find("Nationality")?,
        overall: find("Overall")?,
        potential: find("Potential")?,
        club: find("Club")?,
        value: find("Value")?,
        wage: find("Wage")?,
        preferred_foot: find("Preferred Foot")?,
        position: find("Position")?,
    })
}

fn is_index_column(idx: usize, header: &str) -> bool {
    header == INDEX_HEADER || (idx == 0 && header.is_empty())
}

/// Read the player dataset from a CSV file
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    read_dataset_from(file, &AssetConfig::default())
}

/// Read the player dataset from any CSV source, deriving photo URLs with `assets`
pub fn read_dataset_from<R: Read>(source: R, assets: &AssetConfig) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    let cols = find_required_columns(&headers)?;

    // Columns without a typed field, kept as raw attributes
    let extra: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, h)| !is_index_column(*idx, h) && !KNOWN_COLUMNS.contains(h))
        .collect();

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(idx, h)| !is_index_column(*idx, h))
        .map(|(_, h)| h.to_string())
        .collect();

    let mut players = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = row_idx + 2;
        players.push(parse_player(&record, row, &cols, &extra, assets)?);
    }

    log::info!(
        "Loaded {} players with {} columns",
        players.len(),
        columns.len()
    );
    Ok(Dataset::new(columns, players))
}

fn parse_player(
    record: &StringRecord,
    row: usize,
    cols: &ColumnIndices,
    extra: &[(usize, &str)],
    assets: &AssetConfig,
) -> Result<Player> {
    let text = |idx: usize| record.get(idx).unwrap_or("").to_string();
    let number = |idx: usize, column: &str| -> Result<u32> {
        let raw = record.get(idx).unwrap_or("").trim();
        raw.parse().map_err(|_| StatsError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
    };

    let id = number(cols.id, "ID")?;
    let photo = text(cols.photo);
    let asset_url = assets.locate(&photo, id)?;

    let attributes: HashMap<String, String> = extra
        .iter()
        .map(|&(idx, header)| (header.to_string(), text(idx)))
        .collect();

    Ok(Player {
        id,
        name: text(cols.name),
        age: number(cols.age, "Age")?,
        nationality: text(cols.nationality),
        overall: number(cols.overall, "Overall")?,
        potential: number(cols.potential, "Potential")?,
        club: text(cols.club),
        value: text(cols.value),
        wage: text(cols.wage),
        preferred_foot: text(cols.preferred_foot),
        position: text(cols.position),
        photo,
        asset_url,
        attributes,
    })
}

/// Read the trait category map from a JSON file
pub fn read_traits(path: &Path) -> Result<TraitCategoryMap> {
    let file = std::fs::File::open(path)?;
    read_traits_from(file)
}

/// Read the trait category map from any JSON source
pub fn read_traits_from<R: Read>(source: R) -> Result<TraitCategoryMap> {
    let traits: TraitCategoryMap = serde_json::from_reader(source)?;
    log::info!("Loaded {} trait categories", traits.len());
    Ok(traits)
}
