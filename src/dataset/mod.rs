//! The in-memory player dataset and its loaders

pub mod reader;

pub use reader::{read_dataset, read_dataset_from, read_traits, read_traits_from};

use crate::model::{Player, KNOWN_COLUMNS};
use std::collections::HashSet;

/// Immutable, ordered collection of players loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    players: Vec<Player>,
}

impl Dataset {
    /// Build a dataset from an explicit column list and its players
    pub fn new(columns: Vec<String>, players: Vec<Player>) -> Self {
        Self { columns, players }
    }

    /// Build a dataset whose columns are the known columns plus every
    /// attribute carried by the players (sorted).
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut extra: Vec<String> = players
            .iter()
            .flat_map(|p| p.attributes.keys())
            .filter(|k| !KNOWN_COLUMNS.contains(&k.as_str()))
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        extra.sort();

        let columns = KNOWN_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(extra)
            .collect();
        Self { columns, players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Distinct positions in first-appearance order
    pub fn positions(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.position.as_str()))
    }

    /// Distinct player names in first-appearance order
    pub fn player_names(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.name.as_str()))
    }

    /// Highest identifier in the dataset, the upper bound for ID lookups
    pub fn max_id(&self) -> Option<u32> {
        self.players.iter().map(|p| p.id).max()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_players(vec![
            Player::new(1, "A").with_position("ST").with_attribute("Finishing", "80"),
            Player::new(7, "B").with_position("GK").with_attribute("GKDiving", "85"),
            Player::new(3, "A").with_position("ST"),
            Player::new(4, "C"),
        ])
    }

    #[test]
    fn test_positions_distinct_in_order() {
        assert_eq!(sample().positions(), vec!["ST", "GK"]);
    }

    #[test]
    fn test_player_names_distinct() {
        assert_eq!(sample().player_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_columns_from_players() {
        let ds = sample();
        assert!(ds.has_column("Name"));
        assert!(ds.has_column("Finishing"));
        assert!(ds.has_column("GKDiving"));
        assert!(!ds.has_column("Curve"));
        assert_eq!(ds.columns().len(), KNOWN_COLUMNS.len() + 2);
    }

    #[test]
    fn test_max_id() {
        assert_eq!(sample().max_id(), Some(7));
        assert_eq!(Dataset::default().max_id(), None);
    }
}
