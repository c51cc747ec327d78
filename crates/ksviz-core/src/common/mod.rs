pub mod constants;
pub mod occupancy;
pub mod settings;
pub mod spectroscopic;
