use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Unknown trait category: {0}")]
    UnknownTraitCategory(String),

    #[error("Asset reference for player {id} has no '{marker}' marker: {reference}")]
    MissingAssetMarker {
        id: u32,
        marker: String,
        reference: String,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Required column '{0}' not found")]
    MissingColumn(String),

    #[error("Row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("{player}: '{column}' is not numeric ('{value}')")]
    InvalidStat {
        player: String,
        column: String,
        value: String,
    },

    #[error("Photo error: {0}")]
    Photo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
