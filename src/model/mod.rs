pub mod constants;
pub mod methods;
pub mod profile;
pub mod scores;
pub mod thresholds;
