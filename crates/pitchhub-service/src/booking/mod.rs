//! Booking core: pricing, availability and the orchestrator.

pub mod availability;
pub mod pricing;
pub mod service;

pub use availability::{AvailabilityChecker, SlotAvailability};
pub use pricing::PriceQuote;
pub use service::{BookingOutcome, BookingService, CreateBookingRequest};
