pub mod calculations;
pub mod emissions;
pub mod error;
pub mod trips;
pub mod usage;
