//! Trauma Economy - turn-integrated stress, corruption and resource rules

pub mod core;
pub mod trauma;
