pub mod availability_index;
pub mod catalog;
pub mod coordinator;

pub use availability_index::AvailabilityIndex;
pub use catalog::Catalog;
pub use coordinator::{BookingPolicy, ReservationCoordinator};
