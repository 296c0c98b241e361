//! Variable refresh execution.
//!
//! This module ties the pieces together: it builds the refresh request from a
//! variable's [`RefreshConfig`](crate::models::RefreshConfig), sends it,
//! checks the status, parses the JSON body and applies the response transform.
//!
//! Refreshing is deliberately simple:
//!
//! - one outbound request per call, no retries, no timeout beyond the
//!   transport's configuration;
//! - no locking: two concurrent refreshes of the same variable race and the
//!   caller keeps whichever result it stores last;
//! - no cycle detection: a refresh configuration may reference any variable,
//!   including the one being refreshed, and sees its current value.

pub mod builder;
pub mod client;
pub mod error;

pub use builder::build_refresh_request;
pub use client::RefreshClient;
pub use error::RefreshError;

use crate::models::{RefreshConfig, Variable};
use crate::variables::transform_response;

/// Refreshes a variable using a client built from the global configuration.
///
/// Returns the new value; the caller is responsible for storing it.
///
/// # Examples
///
/// ```no_run
/// use modhead_refresh::executor::refresh_variable;
/// use modhead_refresh::models::{HttpMethod, RefreshConfig, Variable};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = Variable::new("1", "token", "").with_refresh_config(
///     RefreshConfig::new(HttpMethod::GET, "https://auth.example.com/token")
///         .with_transform("access_token"),
/// );
///
/// let new_value = refresh_variable(&token, &[token.clone()]).await?;
/// println!("{}", new_value);
/// # Ok(())
/// # }
/// ```
pub async fn refresh_variable(
    variable: &Variable,
    all_variables: &[Variable],
) -> Result<String, RefreshError> {
    // Reported without touching the network
    if variable.refresh_config.is_none() {
        return Err(RefreshError::Configuration(variable.name.clone()));
    }

    let client = RefreshClient::from_global_config()?;
    refresh_variable_with(&client, variable, all_variables).await
}

/// Refreshes a variable with an explicit client.
///
/// `all_variables` is the substitution context for the URL, headers and
/// body.
pub async fn refresh_variable_with(
    client: &RefreshClient,
    variable: &Variable,
    all_variables: &[Variable],
) -> Result<String, RefreshError> {
    let config = variable
        .refresh_config
        .as_ref()
        .ok_or_else(|| RefreshError::Configuration(variable.name.clone()))?;

    let result = execute_refresh(client, config, all_variables).await;

    match &result {
        Ok(_) => log::info!("Refreshed variable '{}'", variable.name),
        Err(e) => log::warn!("Failed to refresh variable '{}': {}", variable.name, e),
    }

    result
}

async fn execute_refresh(
    client: &RefreshClient,
    config: &RefreshConfig,
    all_variables: &[Variable],
) -> Result<String, RefreshError> {
    let request = build_refresh_request(config, all_variables);
    let response = client.send(&request).await?;

    if !response.is_success() {
        return Err(RefreshError::Http {
            status: response.status_code,
            status_text: response.status_text,
        });
    }

    let data = response.json().map_err(|e| match response.content_type() {
        Some(content_type) => {
            RefreshError::Parse(format!("{} (content-type: {})", e, content_type))
        }
        None => RefreshError::from(e),
    })?;
    Ok(transform_response(
        &data,
        config.transform_response.as_deref(),
    )?)
}

/// Refreshes the variable with the given id and stores the new value in place.
///
/// The whole list is the substitution context. On any error the list is left
/// exactly as it was.
pub async fn refresh_in_place(
    client: &RefreshClient,
    variables: &mut [Variable],
    id: &str,
) -> Result<String, RefreshError> {
    let index = variables
        .iter()
        .position(|v| v.id == id)
        .ok_or_else(|| RefreshError::VariableNotFound(id.to_string()))?;

    let new_value = refresh_variable_with(client, &variables[index], variables).await?;
    variables[index].value = new_value.clone();

    Ok(new_value)
}
