//! Data models for variables, refresh requests and responses.
//!
//! This module contains the core data structures shared by the substitution,
//! request building and refresh code.

pub mod request;
pub mod response;
pub mod variable;

pub use request::{HttpMethod, RefreshRequest};
pub use response::RefreshResponse;
pub use variable::{apply_refreshed_value, RefreshBody, RefreshConfig, Variable, MASKED_VALUE};
