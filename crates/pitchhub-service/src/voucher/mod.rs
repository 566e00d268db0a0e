//! Voucher validation and administration.

pub mod rules;
pub mod service;
pub mod validator;

pub use rules::{VoucherRejection, check_usable, validate_code_format};
pub use service::{CreateVoucherRequest, VoucherService};
pub use validator::{VoucherDecision, VoucherValidator};
