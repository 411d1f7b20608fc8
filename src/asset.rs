//! Player photo URL derivation
//!
//! The dataset's `Photo` column points at a retired image host. The live
//! host keeps the same prefix, swaps the domain suffix, and shards images
//! by the zero-padded player ID: `158023` lives under `158/023/`.

use crate::error::{Result, StatsError};

/// Width of a formatted player identifier
pub const ID_WIDTH: usize = 6;

/// Characters of the formatted identifier used for the first path shard
const SHARD_SPLIT: usize = 3;

/// Format an identifier as decimal, left-padded with zeros to six characters.
///
/// Identifiers that already need six or more digits are returned unpadded.
pub fn format_identifier(id: u32) -> String {
    format!("{:0width$}", id, width = ID_WIDTH)
}

/// Constants used to rewrite an asset reference into a photo URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Substring separating the kept prefix from the discarded suffix
    pub marker: String,
    /// Appended to the prefix in place of the marker's domain part
    pub domain_suffix: String,
    /// Final path component of every photo URL
    pub fixed_suffix: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            marker: ".org/players/".to_string(),
            domain_suffix: ".net".to_string(),
            fixed_suffix: "19_60.png".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.domain_suffix = suffix.into();
        self
    }

    pub fn with_fixed_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.fixed_suffix = suffix.into();
        self
    }

    /// Derive the photo URL for a player from its raw asset reference
    pub fn locate(&self, reference: &str, id: u32) -> Result<String> {
        let (prefix, _) = reference.split_once(self.marker.as_str()).ok_or_else(|| {
            StatsError::MissingAssetMarker {
                id,
                marker: self.marker.clone(),
                reference: reference.to_string(),
            }
        })?;

        let padded = format_identifier(id);
        let (shard, rest) = padded.split_at(SHARD_SPLIT);

        Ok(format!(
            "{}{}/players/{}/{}/{}",
            prefix, self.domain_suffix, shard, rest, self.fixed_suffix
        ))
    }
}

/// Derive the photo URL using the default host configuration
pub fn locate_asset(reference: &str, id: u32) -> Result<String> {
    AssetConfig::default().locate(reference, id)
}
