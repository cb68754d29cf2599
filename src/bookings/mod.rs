// Bookings module
// Users book catalog services for a date range; admins move bookings through
// their status lifecycle

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod status_machine;

pub use models::{Booking, BookingStatus};
pub use repository::{BookingStore, PgBookingRepository};
pub use service::BookingService;
