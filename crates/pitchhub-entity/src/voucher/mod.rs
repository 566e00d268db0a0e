//! Voucher entities.

pub mod model;

pub use model::{CreateVoucher, Voucher};
