pub mod player;
pub mod traits;

pub use player::{Player, BASIC_INFO, KNOWN_COLUMNS};
pub use traits::TraitCategoryMap;
