pub mod dashboard;
pub mod emissions;
pub mod impact;
pub mod proxy;
pub mod trips;
pub mod usage;
