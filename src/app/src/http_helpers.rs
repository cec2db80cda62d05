//! HTTP helper functions for the configuration core
//!
//! Response handling shared by the request macros. Failures are plain
//! strings here; the update handlers attach the action name when they
//! turn them into [`crate::Error::Network`].

use crux_http::Response;

/// Prefix for requests to the local device.
///
/// `crux_http` rejects relative URLs, so local paths get this dummy origin.
/// The web shell strips it again and issues a same-origin request.
pub const BASE_URL: &str = "https://relative";

/// Request header telling the shell to abort after this many milliseconds.
pub const TIMEOUT_HEADER: &str = "X-Timeout-Ms";

/// Full URL for `path` on the device at `endpoint`.
///
/// An empty endpoint means the device serving the UI.
///
/// # Example
/// ```
/// use axeos_core::http_helpers::build_url;
/// assert_eq!(build_url("", "/api/system/info"), "https://relative/api/system/info");
/// assert_eq!(
///     build_url("http://10.0.0.5/", "/api/system/info"),
///     "http://10.0.0.5/api/system/info"
/// );
/// ```
pub fn build_url(endpoint: &str, path: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.is_empty() {
        format!("{BASE_URL}{path}")
    } else {
        format!("{endpoint}{path}")
    }
}

/// Returns `true` if the response status is 2xx.
pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Describe a non-2xx response, preferring the body the device sent.
pub fn extract_error_message(response: &mut Response<Vec<u8>>) -> String {
    let status = response.status().to_string();

    match response.take_body() {
        Some(body) if body.is_empty() => format!("HTTP {status} (Empty body)"),
        Some(body) => match String::from_utf8(body) {
            Ok(msg) => msg,
            Err(e) => format!("HTTP {status} (Invalid UTF-8: {e})"),
        },
        None => format!("HTTP {status} (No body)"),
    }
}

/// Parse JSON from response body.
///
/// Returns error if response is not successful or JSON parsing fails.
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: &mut Response<Vec<u8>>,
) -> Result<T, String> {
    if !is_response_success(response) {
        return Err(extract_error_message(response));
    }

    match response.take_body() {
        Some(body) => serde_json::from_slice(&body).map_err(|e| format!("JSON parse error: {e}")),
        None => Err("Empty response body".to_string()),
    }
}

/// Check response status only (no body parsing).
pub fn check_response_status(response: &mut Response<Vec<u8>>) -> Result<(), String> {
    if is_response_success(response) {
        Ok(())
    } else {
        Err(extract_error_message(response))
    }
}

/// Transport-level failure (no response at all).
pub fn map_http_error(error: impl std::fmt::Display) -> String {
    let message = error.to_string();
    log::error!("request failed: {message}");
    message
}

/// Process HTTP response result and check status only (no JSON parsing)
pub fn process_status_response(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), String> {
    match result {
        Ok(mut response) => check_response_status(&mut response),
        Err(e) => Err(map_http_error(e)),
    }
}

/// Process HTTP response result and parse JSON
pub fn process_json_response<T: serde::de::DeserializeOwned>(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, String> {
    match result {
        Ok(mut response) => parse_json_response(&mut response),
        Err(e) => Err(map_http_error(e)),
    }
}
