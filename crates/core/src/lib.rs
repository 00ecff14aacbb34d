//! Core business logic for recipebox.

pub mod services;

pub use services::*;
