//! Variable refresh core for the ModHead header rewriter.
//!
//! Header rules reference named variables through `${name}` placeholders. A
//! variable can carry a refresh configuration describing an HTTP call (usually
//! to an auth endpoint) whose response yields the variable's next value.
//!
//! # Architecture
//!
//! - **models**: `Variable`, `RefreshConfig` and the request/response types
//! - **variables**: placeholder substitution and response transforms
//! - **executor**: request building, the reqwest transport and the refresh flow
//! - **config**: transport settings (timeouts, redirects, TLS validation)
//! - **store**: loading and saving variable lists in settings files
//!
//! # Refresh flow
//!
//! 1. Substitute variables into the URL, header values and body
//! 2. Encode a structured body as JSON or form data based on Content-Type
//! 3. Send the request; non-2xx statuses fail with the status line
//! 4. Parse the body as JSON
//! 5. Apply the transform: whole response, dot-path, or `{path}` template
//!
//! ```no_run
//! use modhead_refresh::executor::{refresh_in_place, RefreshClient};
//! use modhead_refresh::store::SettingsFile;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut settings = SettingsFile::load("settings.json")?;
//! let client = RefreshClient::from_global_config()?;
//!
//! let id = settings.find_by_name("token").map(|v| v.id.clone()).unwrap_or_default();
//! refresh_in_place(&client, &mut settings.variables, &id).await?;
//! settings.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! Values, including sensitive ones, are handled in clear text. Sensitivity
//! only affects how values are displayed.

pub mod config;
pub mod executor;
pub mod models;
pub mod store;
pub mod variables;

pub use executor::{
    refresh_in_place, refresh_variable, refresh_variable_with, RefreshClient, RefreshError,
};
pub use models::{RefreshBody, RefreshConfig, Variable};
