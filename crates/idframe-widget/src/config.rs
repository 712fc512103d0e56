//! SDK configuration.
//!
//! Configuration is injected into each widget at construction - there is
//! no process-wide config singleton. All fields have compile-time
//! defaults; `#[serde(default)]` keeps every field optional in stored
//! form, and [`Config::merge`] supports layered overrides the same way
//! the rest of the stack does.

use idframe_types::{ErrorCode, Origin};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Hosted frame domain used when no override is configured.
pub const DEFAULT_FRAME_DOMAIN: &str = "id.idframe.dev";

/// Prompt values forwarded to the authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Provider decides.
    Default,
    /// Never show interactive prompts.
    None,
    /// Force a login prompt.
    Login,
    /// Force a consent prompt.
    Consent,
    /// Force the account chooser.
    SelectAccount,
}

impl Prompt {
    /// Returns the wire value for the `prompt` query parameter.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::None => "none",
            Self::Login => "login",
            Self::Consent => "consent",
            Self::SelectAccount => "select_account",
        }
    }
}

/// How the authentication response returns to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Navigate the current page to the redirect target.
    #[default]
    Redirect,
    /// Open the flow in a new tab.
    InNewTab,
}

/// Timer budgets for the load sequence.
///
/// # Example
///
/// ```
/// use idframe_widget::Timeouts;
///
/// let timeouts = Timeouts::default();
/// assert_eq!(timeouts.load_ms, 5_000);
/// assert_eq!(timeouts.settle_ms, 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Budget for the embedded surface to confirm load (ms).
    pub load_ms: u64,
    /// Settle delay between load confirmation and the loaded state (ms).
    ///
    /// The pause hides the swap from scaffold to frame that would
    /// otherwise flash.
    pub settle_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            load_ms: 5_000,
            settle_ms: 300,
        }
    }
}

impl Timeouts {
    /// Load budget as a [`Duration`].
    #[must_use]
    pub fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }

    /// Settle delay as a [`Duration`].
    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    fn merge(&mut self, other: &Self) {
        let default = Self::default();
        if other.load_ms != default.load_ms {
            self.load_ms = other.load_ms;
        }
        if other.settle_ms != default.settle_ms {
            self.settle_ms = other.settle_ms;
        }
    }
}

/// Callback invoked with the authentication response payload.
///
/// Returning `false` suppresses the SDK's default redirect handling.
#[derive(Clone)]
pub struct AuthCallback(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl AuthCallback {
    /// Wraps a closure as an auth callback.
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the callback.
    #[must_use]
    pub fn invoke(&self, response: &Value) -> bool {
        (self.0)(response)
    }
}

impl std::fmt::Debug for AuthCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCallback").finish_non_exhaustive()
    }
}

/// Main SDK configuration, consumed read-only by widgets.
///
/// # PKCE
///
/// `code_verifier` and `code_challenge` are mutually exclusive; both are
/// optional, both set is a validation error. Only the challenge ever
/// appears in a frame URL - the verifier stays in the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registered application id.
    pub app: u64,

    /// Redirect target for the authentication response.
    pub redirect_url: String,

    /// Opaque state round-tripped through the flow.
    pub state: Option<String>,

    /// PKCE verifier (host-side secret).
    pub code_verifier: Option<String>,

    /// PKCE challenge (derived, URL-safe).
    pub code_challenge: Option<String>,

    /// Requested scopes, space-separated.
    pub scope: Option<String>,

    /// Prompt directives for the authorization endpoint.
    pub prompt: Vec<Prompt>,

    /// Response delivery mode.
    pub mode: AuthMode,

    /// Override for the hosted frame domain.
    pub frame_domain: Option<String>,

    /// Override for the login page domain.
    pub login_domain: Option<String>,

    /// Override for the OAuth endpoint domain.
    pub oauth_domain: Option<String>,

    /// Serve the frame over plain http://localhost (development only).
    pub localhost: bool,

    /// Ask the hosted surface for verbose diagnostics.
    pub debug: bool,

    /// Timer budgets.
    pub timeouts: Timeouts,

    /// Callback invoked when authentication succeeds.
    #[serde(skip)]
    pub on_auth: Option<AuthCallback>,
}

impl Config {
    /// Creates a config for an application.
    #[must_use]
    pub fn new(app: u64, redirect_url: impl Into<String>) -> Self {
        Self {
            app,
            redirect_url: redirect_url.into(),
            ..Self::default()
        }
    }

    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingApp`] when the application id is unset
    /// - [`ConfigError::PkceConflict`] when both `code_verifier` and
    ///   `code_challenge` are set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app == 0 {
            return Err(ConfigError::MissingApp);
        }
        if self.code_verifier.is_some() && self.code_challenge.is_some() {
            return Err(ConfigError::PkceConflict);
        }
        Ok(())
    }

    /// Returns the effective hosted frame domain.
    #[must_use]
    pub fn effective_frame_domain(&self) -> &str {
        self.frame_domain.as_deref().unwrap_or(DEFAULT_FRAME_DOMAIN)
    }

    /// Returns the origin the bridge must accept messages from.
    #[must_use]
    pub fn frame_origin(&self) -> Origin {
        if self.localhost {
            Origin::new(format!("http://{}", self.effective_frame_domain()))
        } else {
            Origin::https(self.effective_frame_domain())
        }
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only when they
    /// differ from the defaults, enabling layered configuration.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.app != default.app {
            self.app = other.app;
        }
        if other.redirect_url != default.redirect_url {
            self.redirect_url = other.redirect_url.clone();
        }
        if other.state.is_some() {
            self.state = other.state.clone();
        }
        if other.code_verifier.is_some() {
            self.code_verifier = other.code_verifier.clone();
        }
        if other.code_challenge.is_some() {
            self.code_challenge = other.code_challenge.clone();
        }
        if other.scope.is_some() {
            self.scope = other.scope.clone();
        }
        if !other.prompt.is_empty() {
            self.prompt = other.prompt.clone();
        }
        if other.mode != default.mode {
            self.mode = other.mode;
        }
        if other.frame_domain.is_some() {
            self.frame_domain = other.frame_domain.clone();
        }
        if other.login_domain.is_some() {
            self.login_domain = other.login_domain.clone();
        }
        if other.oauth_domain.is_some() {
            self.oauth_domain = other.oauth_domain.clone();
        }
        if other.localhost != default.localhost {
            self.localhost = other.localhost;
        }
        if other.debug != default.debug {
            self.debug = other.debug;
        }
        self.timeouts.merge(&other.timeouts);
        if other.on_auth.is_some() {
            self.on_auth = other.on_auth.clone();
        }
    }
}

/// Configuration and call-site validation failures.
///
/// These are programmer errors: they are raised synchronously at the
/// call site instead of flowing through the lifecycle event channel.
///
/// # Error Code Convention
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`MissingContainer`](ConfigError::MissingContainer) | `CONFIG_MISSING_CONTAINER` | No |
/// | [`MissingApp`](ConfigError::MissingApp) | `CONFIG_MISSING_APP` | No |
/// | [`PkceConflict`](ConfigError::PkceConflict) | `CONFIG_PKCE_CONFLICT` | No |
/// | [`InvalidUrl`](ConfigError::InvalidUrl) | `CONFIG_INVALID_URL` | No |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `render()` was called without a mount target.
    #[error("render requires a mount target")]
    MissingContainer,

    /// The application id was never set.
    #[error("application id is not configured")]
    MissingApp,

    /// `code_verifier` and `code_challenge` are both set.
    #[error("code_verifier and code_challenge are mutually exclusive")]
    PkceConflict,

    /// A configured domain or redirect target does not parse as a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingContainer => "CONFIG_MISSING_CONTAINER",
            Self::MissingApp => "CONFIG_MISSING_APP",
            Self::PkceConflict => "CONFIG_PKCE_CONFLICT",
            Self::InvalidUrl(_) => "CONFIG_INVALID_URL",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idframe_types::assert_error_codes;

    fn base_config() -> Config {
        Config::new(7_503_123, "https://host.example/auth")
    }

    #[test]
    fn validate_accepts_minimal_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_app() {
        let config = Config::default();
        assert_eq!(config.validate(), Err(ConfigError::MissingApp));
    }

    #[test]
    fn validate_rejects_pkce_conflict() {
        let mut config = base_config();
        config.code_verifier = Some("verifier".into());
        config.code_challenge = Some("challenge".into());
        assert_eq!(config.validate(), Err(ConfigError::PkceConflict));
    }

    #[test]
    fn validate_accepts_either_pkce_half() {
        let mut config = base_config();
        config.code_verifier = Some("verifier".into());
        assert!(config.validate().is_ok());

        let mut config = base_config();
        config.code_challenge = Some("challenge".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn frame_origin_uses_default_domain() {
        assert_eq!(
            base_config().frame_origin().as_str(),
            "https://id.idframe.dev"
        );
    }

    #[test]
    fn frame_origin_honors_override_and_localhost() {
        let mut config = base_config();
        config.frame_domain = Some("id.stage.idframe.dev".into());
        assert_eq!(
            config.frame_origin().as_str(),
            "https://id.stage.idframe.dev"
        );

        config.frame_domain = Some("localhost:3000".into());
        config.localhost = true;
        assert_eq!(config.frame_origin().as_str(), "http://localhost:3000");
    }

    #[test]
    fn toml_round_trip() {
        let mut config = base_config();
        config.scope = Some("email phone".into());
        config.prompt = vec![Prompt::Login, Prompt::Consent];
        config.timeouts.load_ms = 2_000;

        let toml_str = config.to_toml().expect("serialize");
        let back = Config::from_toml(&toml_str).expect("deserialize");

        assert_eq!(back.app, config.app);
        assert_eq!(back.scope, config.scope);
        assert_eq!(back.prompt, config.prompt);
        assert_eq!(back.timeouts, config.timeouts);
    }

    #[test]
    fn merge_overrides_only_non_default_fields() {
        let mut base = base_config();
        base.scope = Some("email".into());

        let mut overlay = Config::default();
        overlay.debug = true;
        overlay.timeouts.load_ms = 1_000;

        base.merge(&overlay);

        assert!(base.debug);
        assert_eq!(base.timeouts.load_ms, 1_000);
        // Untouched overlay fields keep the base values
        assert_eq!(base.app, 7_503_123);
        assert_eq!(base.scope, Some("email".into()));
        assert_eq!(base.timeouts.settle_ms, 300);
    }

    #[test]
    fn auth_callback_invokes() {
        let callback = AuthCallback::new(|response| response["ok"] == true);
        assert!(callback.invoke(&serde_json::json!({"ok": true})));
        assert!(!callback.invoke(&serde_json::json!({"ok": false})));
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(
            &[
                ConfigError::MissingContainer,
                ConfigError::MissingApp,
                ConfigError::PkceConflict,
                ConfigError::InvalidUrl("x".into()),
            ],
            "CONFIG_",
        );
    }
}
