//! Admin-only handlers. Capability checks happen in the services.

pub mod bookings;
pub mod catalog;
pub mod vouchers;
