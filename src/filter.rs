//! Player selection by name/club text, position, or identifier
//!
//! Every filter returns borrowed players in dataset order and treats an
//! empty selection as "nothing selected yet" rather than "everything".

use crate::dataset::Dataset;
use crate::model::Player;

/// Players whose name or club contains `term`, ignoring case.
///
/// An empty term matches nothing.
pub fn search_name_or_club<'a>(dataset: &'a Dataset, term: &str) -> Vec<&'a Player> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    let found: Vec<&Player> = dataset
        .players()
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.club.to_lowercase().contains(&needle)
        })
        .collect();

    log::debug!("Search '{}' matched {} players", term, found.len());
    found
}

/// Players whose position is one of `positions`
pub fn filter_by_positions<'a, S: AsRef<str>>(
    dataset: &'a Dataset,
    positions: &[S],
) -> Vec<&'a Player> {
    dataset
        .players()
        .iter()
        .filter(|p| positions.iter().any(|pos| pos.as_ref() == p.position))
        .collect()
}

/// Players with identifier `id`; empty when the ID does not exist
pub fn find_by_id(dataset: &Dataset, id: u32) -> Vec<&Player> {
    dataset.players().iter().filter(|p| p.id == id).collect()
}

/// A user's current selection, re-applied against the dataset on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerQuery {
    Text(String),
    Positions(Vec<String>),
    Id(u32),
}

impl PlayerQuery {
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Player> {
        match self {
            PlayerQuery::Text(term) => search_name_or_club(dataset, term),
            PlayerQuery::Positions(positions) => filter_by_positions(dataset, positions.as_slice()),
            PlayerQuery::Id(id) => find_by_id(dataset, *id),
        }
    }
}
