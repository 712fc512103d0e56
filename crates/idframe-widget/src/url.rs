//! Frame source and redirect URL construction.
//!
//! Pure, deterministic helpers with no side effects. [`frame_url`] is
//! the Frame Source Builder consumed by the widget's load sequence;
//! [`redirect_with_payload_url`] rebuilds the host's redirect target
//! with the authentication payload attached.

use crate::config::{Config, ConfigError};
use idframe_types::Origin;
use ::url::Url;
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixed protocol-version marker included in every frame URL.
pub const PROTOCOL_VERSION: u32 = 2;

/// Builds the fully qualified URL for an embedded surface.
///
/// Combines the static application identity (`app_name` path segment,
/// app id), the derived runtime context (caller origin, protocol-version
/// marker - always present, the embedded surface refuses to talk
/// without them) and the caller-supplied query parameters.
///
/// # Errors
///
/// [`ConfigError::InvalidUrl`] when the effective frame domain does not
/// form a valid base URL.
pub fn frame_url(
    app_name: &str,
    caller_origin: &Origin,
    query: &BTreeMap<String, String>,
    config: &Config,
) -> Result<String, ConfigError> {
    let scheme = if config.localhost { "http" } else { "https" };
    let base = format!("{scheme}://{}/{app_name}", config.effective_frame_domain());
    let mut url = Url::parse(&base).map_err(|err| ConfigError::InvalidUrl(err.to_string()))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("app_id", &config.app.to_string());

        for (key, value) in query {
            pairs.append_pair(key, value);
        }

        if !config.redirect_url.is_empty() {
            pairs.append_pair("redirect_uri", &config.redirect_url);
        }
        if let Some(state) = &config.state {
            pairs.append_pair("state", state);
        }
        if let Some(scope) = &config.scope {
            pairs.append_pair("scope", scope);
        }
        if !config.prompt.is_empty() {
            let prompt = config
                .prompt
                .iter()
                .map(|p| p.code())
                .collect::<Vec<_>>()
                .join(",");
            pairs.append_pair("prompt", &prompt);
        }
        if let Some(challenge) = &config.code_challenge {
            pairs.append_pair("code_challenge", challenge);
            pairs.append_pair("code_challenge_method", "S256");
        }
        if config.debug {
            pairs.append_pair("debug", "1");
        }

        pairs.append_pair("origin", caller_origin.as_str());
        pairs.append_pair("oauth_version", &PROTOCOL_VERSION.to_string());
    }

    Ok(url.into())
}

/// Rebuilds the configured redirect target with the authentication
/// payload attached.
///
/// The payload is serialized compactly into a single `payload` query
/// parameter; the configured `state` rides along when present.
///
/// # Errors
///
/// [`ConfigError::InvalidUrl`] when the configured redirect target does
/// not parse.
pub fn redirect_with_payload_url(payload: &Value, config: &Config) -> Result<String, ConfigError> {
    let mut url = Url::parse(&config.redirect_url)
        .map_err(|err| ConfigError::InvalidUrl(err.to_string()))?;

    let encoded = payload.to_string();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("payload", &encoded);
        if let Some(state) = &config.state {
            pairs.append_pair("state", state);
        }
        pairs.append_pair("oauth_version", &PROTOCOL_VERSION.to_string());
    }

    Ok(url.into())
}
