pub mod config;
pub mod error;
pub mod types;

pub use config::TraumaConfig;
pub use error::{Result, TraumaError};
