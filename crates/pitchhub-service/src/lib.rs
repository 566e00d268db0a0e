//! # pitchhub-service
//!
//! Business logic service layer for PitchHub. The booking core is split
//! into small pieces the orchestrator composes:
//!
//! - `booking::pricing`: duration and price arithmetic
//! - `voucher::rules`, `voucher::validator`: voucher usability
//! - `booking::availability`: slot conflict checks and the slot board
//! - `booking::service`: the booking orchestrator and state machine
//!
//! Services follow constructor injection. All dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod booking;
pub mod context;
pub mod favorite;
pub mod notification;
pub mod pitch;
pub mod review;
pub mod voucher;

pub use account::AccountService;
pub use booking::{AvailabilityChecker, BookingOutcome, BookingService, CreateBookingRequest};
pub use context::RequestContext;
pub use favorite::FavoriteService;
pub use notification::{BookingNotifier, LogMailer, MemoryMailer};
pub use pitch::CatalogService;
pub use review::{CommentService, ReviewService};
pub use voucher::{VoucherService, VoucherValidator};
