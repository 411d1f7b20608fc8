//! Side-by-side statistics for selected players
//!
//! A comparison projects the selected players onto their basic info plus
//! the columns of the chosen trait categories (the wide table), then
//! unpivots the trait columns into one (player, trait, value) row each
//! (the long table) for grouped bar charts.

use crate::dataset::Dataset;
use crate::error::{Result, StatsError};
use crate::model::{Player, TraitCategoryMap, BASIC_INFO};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::io::Write;

/// One (player, trait) pair of the long table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Traits")]
    pub trait_name: String,
    /// `None` when the dataset cell is empty
    #[serde(rename = "Stats", serialize_with = "serialize_stat")]
    pub stat: Option<f64>,
}

/// Result of comparing players across trait categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Wide table header: Name, basic info, then trait columns
    pub columns: Vec<String>,
    /// Wide table rows, one per selected player in ranking order
    pub rows: Vec<Vec<String>>,
    /// Resolved trait columns, duplicates preserved
    pub trait_columns: Vec<String>,
    /// Long table, grouped by player then by trait column
    pub stats: Vec<StatRow>,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Players whose name is in `names`, best Overall first, youngest first on ties.
///
/// Players sharing a selected name are all included; remaining ties keep
/// dataset order.
pub fn select_players<'a, S: AsRef<str>>(dataset: &'a Dataset, names: &[S]) -> Vec<&'a Player> {
    let mut selected: Vec<&Player> = dataset
        .players()
        .iter()
        .filter(|p| names.iter().any(|n| n.as_ref() == p.name))
        .collect();

    selected.sort_by(|a, b| b.overall.cmp(&a.overall).then(a.age.cmp(&b.age)));
    selected
}

/// Build the wide and long comparison tables.
///
/// An empty player or category selection yields an empty comparison.
pub fn compare<S, T>(
    dataset: &Dataset,
    traits: &TraitCategoryMap,
    names: &[S],
    categories: &[T],
) -> Result<Comparison>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    if names.is_empty() || categories.is_empty() {
        return Ok(Comparison::default());
    }

    let trait_columns = traits.resolve_columns(categories)?;
    if let Some(missing) = trait_columns.iter().find(|c| !dataset.has_column(c)) {
        return Err(StatsError::UnknownColumn(missing.clone()));
    }

    let columns: Vec<String> = std::iter::once("Name")
        .chain(BASIC_INFO)
        .map(String::from)
        .chain(trait_columns.iter().cloned())
        .collect();

    let players = select_players(dataset, names);
    let mut rows = Vec::with_capacity(players.len());
    let mut stats = Vec::with_capacity(players.len() * trait_columns.len());

    for player in players {
        rows.push(
            columns
                .iter()
                .map(|c| player.field(c).map(Cow::into_owned).unwrap_or_default())
                .collect(),
        );

        for column in &trait_columns {
            stats.push(StatRow {
                name: player.name.clone(),
                trait_name: column.clone(),
                stat: parse_stat(player, column)?,
            });
        }
    }

    log::debug!(
        "Compared {} players over {} trait columns",
        rows.len(),
        trait_columns.len()
    );

    Ok(Comparison {
        columns,
        rows,
        trait_columns,
        stats,
    })
}

/// Long-form statistics only; see [`compare`]
pub fn reshape<S, T>(
    dataset: &Dataset,
    traits: &TraitCategoryMap,
    names: &[S],
    categories: &[T],
) -> Result<Vec<StatRow>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    Ok(compare(dataset, traits, names, categories)?.stats)
}

/// Write the long table as CSV with a `Name,Traits,Stats` header
pub fn write_stats_csv<W: Write>(stats: &[StatRow], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if stats.is_empty() {
        writer.write_record(["Name", "Traits", "Stats"])?;
    }
    for row in stats {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Whole stats are written as integers, the way the dataset stores them
fn serialize_stat<S>(stat: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *stat {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(v as i64)
        }
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

fn parse_stat(player: &Player, column: &str) -> Result<Option<f64>> {
    let raw = match player.field(column) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| StatsError::InvalidStat {
            player: player.name.clone(),
            column: column.to_string(),
            value: raw.to_string(),
        })
}
