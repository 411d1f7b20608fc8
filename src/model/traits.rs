use crate::error::{Result, StatsError};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Named groups of trait columns, e.g. "Attacking" -> [Crossing, Finishing, ...]
///
/// Categories keep the order they were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitCategoryMap {
    categories: Vec<(String, Vec<String>)>,
}

impl TraitCategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `category -> [column, ...]`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_category<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Add or replace a category; a replaced category keeps its position
    fn insert(&mut self, name: String, columns: Vec<String>) {
        match self.categories.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = columns,
            None => self.categories.push((name, columns)),
        }
    }

    /// Category names in declaration order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Declared columns of one category
    pub fn columns(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, columns)| columns.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Expand selected categories into their concrete columns.
    ///
    /// Columns come out in selection order, then declared order within each
    /// category. Overlapping categories yield duplicate columns.
    pub fn resolve_columns<S: AsRef<str>>(&self, selected: &[S]) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        for category in selected {
            let category = category.as_ref();
            let declared = self
                .columns(category)
                .ok_or_else(|| StatsError::UnknownTraitCategory(category.to_string()))?;
            columns.extend(declared.iter().cloned());
        }
        Ok(columns)
    }
}

struct TraitCategoryVisitor;

impl<'de> Visitor<'de> for TraitCategoryVisitor {
    type Value = TraitCategoryMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category names to column lists")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = TraitCategoryMap::new();
        while let Some((name, columns)) = access.next_entry::<String, Vec<String>>()? {
            map.insert(name, columns);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for TraitCategoryMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TraitCategoryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TraitCategoryMap {
        TraitCategoryMap::new()
            .with_category("Attacking", ["Finishing", "Dribbling"])
            .with_category("Skill", ["Dribbling", "Curve", "BallControl"])
    }

    #[test]
    fn test_resolve_single_category() {
        let cols = sample().resolve_columns(&["Attacking"]).unwrap();
        assert_eq!(cols, vec!["Finishing", "Dribbling"]);
    }

    #[test]
    fn test_resolve_keeps_selection_order_and_duplicates() {
        let cols = sample().resolve_columns(&["Skill", "Attacking"]).unwrap();
        assert_eq!(
            cols,
            vec!["Dribbling", "Curve", "BallControl", "Finishing", "Dribbling"]
        );
    }

    #[test]
    fn test_resolve_unknown_category() {
        let err = sample().resolve_columns(&["Attacking", "unknown"]).unwrap_err();
        assert!(matches!(err, StatsError::UnknownTraitCategory(ref c) if c == "unknown"));
    }

    #[test]
    fn test_resolve_empty_selection() {
        let selected: [&str; 0] = [];
        assert!(sample().resolve_columns(&selected).unwrap().is_empty());
    }

    #[test]
    fn test_from_json() {
        let map = TraitCategoryMap::from_json(
            r#"{"Movement": ["Acceleration", "SprintSpeed"], "Attacking": ["Finishing"]}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.category_names().collect::<Vec<_>>(), vec!["Movement", "Attacking"]);
        assert_eq!(
            map.columns("Movement").unwrap(),
            &["Acceleration".to_string(), "SprintSpeed".to_string()]
        );
    }

    #[test]
    fn test_declaration_order_kept() {
        let map = TraitCategoryMap::from_json(
            r#"{"Skill": ["Curve"], "Attacking": ["Finishing"], "Defending": ["Marking"]}"#,
        )
        .unwrap();
        assert_eq!(
            map.category_names().collect::<Vec<_>>(),
            vec!["Skill", "Attacking", "Defending"]
        );
    }

    #[test]
    fn test_replaced_category_keeps_position() {
        let map = TraitCategoryMap::new()
            .with_category("Attacking", ["Finishing"])
            .with_category("Skill", ["Curve"])
            .with_category("Attacking", ["Volleys"]);
        assert_eq!(map.category_names().collect::<Vec<_>>(), vec!["Attacking", "Skill"]);
        assert_eq!(map.columns("Attacking").unwrap(), &["Volleys".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        assert!(TraitCategoryMap::from_json(r#"{"Attacking": "Finishing"}"#).is_err());
    }
}
