//! # pitchhub-database
//!
//! PostgreSQL connection management, concrete repository implementations
//! for all PitchHub entities, and the [`BookingStore`](store::BookingStore)
//! used by the booking orchestrator (PostgreSQL and in-memory backends).

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookingFilter, BookingStore, InsertOutcome, MemoryBookingStore, PgBookingStore};
