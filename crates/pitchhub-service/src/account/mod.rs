//! Registration, activation and login.

pub mod service;

pub use service::{AccountService, LoginRequest, RegisterRequest};
