use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Columns shown next to a player's name in profiles and comparisons
pub const BASIC_INFO: [&str; 8] = [
    "Age",
    "Nationality",
    "Overall",
    "Potential",
    "Club",
    "Value",
    "Wage",
    "Preferred Foot",
];

/// Columns held as typed fields rather than raw attributes
pub const KNOWN_COLUMNS: [&str; 12] = [
    "ID",
    "Name",
    "Age",
    "Photo",
    "Nationality",
    "Overall",
    "Potential",
    "Club",
    "Value",
    "Wage",
    "Preferred Foot",
    "Position",
];

/// One row of the player dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub nationality: String,
    pub overall: u32,
    pub potential: u32,
    pub club: String,
    pub value: String,
    pub wage: String,
    pub preferred_foot: String,
    pub position: String,
    /// Raw `Photo` column as found in the dataset
    pub photo: String,
    /// Photo URL derived from `photo` at load time
    pub asset_url: String,
    /// Every other column, keyed by exact header, as raw text
    pub attributes: HashMap<String, String>,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_overall(mut self, overall: u32) -> Self {
        self.overall = overall;
        self
    }

    pub fn with_potential(mut self, potential: u32) -> Self {
        self.potential = potential;
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = club.into();
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = nationality.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>, asset_url: impl Into<String>) -> Self {
        self.photo = photo.into();
        self.asset_url = asset_url.into();
        self
    }

    pub fn with_attribute(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(column.into(), value.into());
        self
    }

    /// Look up any column by its dataset header
    pub fn field(&self, column: &str) -> Option<Cow<'_, str>> {
        let value = match column {
            "ID" => Cow::Owned(self.id.to_string()),
            "Name" => Cow::Borrowed(self.name.as_str()),
            "Age" => Cow::Owned(self.age.to_string()),
            "Photo" => Cow::Borrowed(self.photo.as_str()),
            "Nationality" => Cow::Borrowed(self.nationality.as_str()),
            "Overall" => Cow::Owned(self.overall.to_string()),
            "Potential" => Cow::Owned(self.potential.to_string()),
            "Club" => Cow::Borrowed(self.club.as_str()),
            "Value" => Cow::Borrowed(self.value.as_str()),
            "Wage" => Cow::Borrowed(self.wage.as_str()),
            "Preferred Foot" => Cow::Borrowed(self.preferred_foot.as_str()),
            "Position" => Cow::Borrowed(self.position.as_str()),
            other => Cow::Borrowed(self.attributes.get(other)?.as_str()),
        };
        Some(value)
    }

    /// Basic info as (column, value) pairs in display order
    pub fn basic_info(&self) -> Vec<(&'static str, String)> {
        BASIC_INFO
            .iter()
            .map(|&col| {
                let value = self.field(col).map(Cow::into_owned).unwrap_or_default();
                (col, value)
            })
            .collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)?;
        if !self.position.is_empty() {
            write!(f, " {}", self.position)?;
        }
        if !self.club.is_empty() {
            write!(f, ", {}", self.club)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messi() -> Player {
        Player::new(158023, "L. Messi")
            .with_age(31)
            .with_overall(94)
            .with_potential(94)
            .with_club("FC Barcelona")
            .with_nationality("Argentina")
            .with_position("RF")
            .with_attribute("Finishing", "95")
    }

    #[test]
    fn test_field_typed_and_attribute() {
        let player = messi();
        assert_eq!(player.field("Name").as_deref(), Some("L. Messi"));
        assert_eq!(player.field("Overall").as_deref(), Some("94"));
        assert_eq!(player.field("Finishing").as_deref(), Some("95"));
        assert_eq!(player.field("Dribbling"), None);
    }

    #[test]
    fn test_basic_info_order() {
        let info = messi().basic_info();
        let cols: Vec<&str> = info.iter().map(|(c, _)| *c).collect();
        assert_eq!(cols, BASIC_INFO.to_vec());
        assert_eq!(info[0].1, "31");
        assert_eq!(info[4].1, "FC Barcelona");
        // Unset text fields come back empty
        assert_eq!(info[5].1, "");
    }

    #[test]
    fn test_display() {
        assert_eq!(messi().to_string(), "L. Messi (158023) RF, FC Barcelona");
        assert_eq!(Player::new(1, "Free Agent").to_string(), "Free Agent (1)");
    }
}
