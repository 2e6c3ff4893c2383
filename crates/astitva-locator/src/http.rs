//! Shared HTTP plumbing for the provider clients.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::LocatorError;

/// Builds the `reqwest::Client` every provider client owns.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, LocatorError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, LocatorError> {
    Url::parse(base_url).map_err(|e| LocatorError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
///
/// # Errors
///
/// - [`LocatorError::Http`] on network failure, with the URL stripped.
/// - [`LocatorError::UnexpectedStatus`] on a non-2xx status, with the query
///   string stripped.
/// - [`LocatorError::Deserialize`] if the body is not valid JSON.
pub(crate) async fn get_json(
    client: &Client,
    url: &Url,
    context: &str,
) -> Result<serde_json::Value, LocatorError> {
    let response = client
        .get(url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| LocatorError::Http(e.without_url()))?;
    if !response.status().is_success() {
        return Err(LocatorError::UnexpectedStatus {
            status: response.status().as_u16(),
            url: redact_query(url),
        });
    }
    let body = response
        .text()
        .await
        .map_err(|e| LocatorError::Http(e.without_url()))?;
    serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Drops the query string so an encoded Overpass query never ends up in an
/// error message.
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
