pub mod booking_store;
pub mod clock;
pub mod establishment_store;
pub mod user_directory;
