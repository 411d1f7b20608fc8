pub mod asset;
pub mod compare;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod model;
pub mod photo;
pub mod xlsx;

pub use asset::{format_identifier, locate_asset, AssetConfig};
pub use compare::{compare, reshape, Comparison, StatRow};
pub use dataset::Dataset;
pub use error::{Result, StatsError};
pub use filter::{filter_by_positions, find_by_id, search_name_or_club, PlayerQuery};
pub use model::*;
pub use photo::{fetch_photo, Photo, PhotoFetcher};
