//! Core traits defined in `pitchhub-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{Mailer, OutboundMessage};
