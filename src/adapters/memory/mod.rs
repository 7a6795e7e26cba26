//! Process-local stores backing the ports; state is lost on restart.

pub mod booking_store;
pub mod establishment_store;
pub mod user_directory;

pub use booking_store::MemoryBookingStore;
pub use establishment_store::MemoryEstablishmentStore;
pub use user_directory::MemoryUserDirectory;
