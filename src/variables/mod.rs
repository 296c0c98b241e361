//! Variables module for the refresh core
//!
//! This module provides `${name}` placeholder substitution and the response
//! transforms that turn an auth endpoint's reply into a variable value.

pub mod substitution;
pub mod transform;

pub use substitution::{substitute_variables, substitute_variables_in_object};
pub use transform::{extract_by_path, transform_response, TransformError, TransformSpec};
