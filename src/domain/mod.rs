pub mod actor;
pub mod availability;
pub mod booking;
pub mod establishment;
pub mod lifecycle;
pub mod pricing;
pub mod stats;
