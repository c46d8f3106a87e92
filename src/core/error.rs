use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraumaError {
    #[error("Character not found: {0:?}")]
    CharacterNotFound(crate::core::types::CharacterId),

    #[error("Invalid bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: i32, max: i32 },

    #[error("Permanent floor {floor} outside track range 0..={ceiling}")]
    FloorOutOfRange { floor: i32, ceiling: i32 },

    #[error("Pool starting value {starts_at} outside [{min}, {max}]")]
    PoolStartOutOfRange { starts_at: i32, min: i32, max: i32 },

    #[error("Negative {field} rate: {value}")]
    NegativeRate { field: &'static str, value: i32 },

    #[error("Invalid panic table: {0}")]
    InvalidPanicTable(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TraumaError>;
