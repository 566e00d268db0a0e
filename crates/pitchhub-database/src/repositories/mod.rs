//! Repository implementations for all PitchHub entities.

pub mod booking;
pub mod comment;
pub mod favorite;
pub mod pitch;
pub mod review;
pub mod slot;
pub mod user;
pub mod voucher;

pub use booking::BookingRepository;
pub use comment::CommentRepository;
pub use favorite::FavoriteRepository;
pub use pitch::{PitchOrder, PitchRepository, PitchSearchFilter};
pub use review::ReviewRepository;
pub use slot::SlotRepository;
pub use user::UserRepository;
pub use voucher::VoucherRepository;
