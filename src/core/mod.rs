//! Core types shared by every grab module.
//!
//! At the moment this is the error taxonomy and its CLI presentation layer.

pub mod error;

pub use error::{ErrorContext, GrabError, user_friendly_error};
