//! Session cookie configuration and validation.
//!
//! The server configuration layer supplies optional toggles; this module
//! decides what they mean for the current build. Debug builds fill gaps with
//! defaults and log a warning. Release builds insist on explicit, safe values.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

pub mod fingerprint;

/// Key file read when no explicit path is configured.
pub const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Shortest key accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest key material cookie key derivation accepts.
const KEY_DERIVE_MIN_LEN: usize = 32;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forum_backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as loaded from configuration.
///
/// Every field is optional so the build mode decides how absent values are
/// treated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionToggles {
    /// Path of the file holding the cookie key material.
    pub key_file: Option<PathBuf>,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy name: `Strict`, `Lax`, or `None`.
    pub same_site: Option<String>,
    /// Whether a missing key file may be replaced by a random key.
    pub allow_ephemeral: Option<bool>,
}

/// Validated session settings used to build the session middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required setting is missing.
    #[error("missing required session setting: {name}")]
    Missing { name: &'static str },
    /// A setting is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("session same-site None requires secure cookies")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// Validate `toggles` for `mode` and load the key material.
///
/// # Errors
/// Returns [`SessionConfigError`] when a release build is missing a toggle, a
/// value is invalid, or the key file cannot be used.
///
/// # Examples
///
/// ```rust
/// use forum_backend::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// let settings = session_settings(&SessionToggles::default(), BuildMode::Debug)
///     .expect("debug builds fall back to defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles.cookie_secure, mode)?;
    let same_site = same_site(toggles.same_site.as_deref(), mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral(toggles.allow_ephemeral, mode)?;
    let path = toggles
        .key_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));
    let key = session_key(&path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn debug_default<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    message: &str,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!("{message}");
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn cookie_secure(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(flag) => Ok(flag),
        None => debug_default(
            mode,
            true,
            SessionConfigError::Missing {
                name: "session_cookie_secure",
            },
            "session_cookie_secure not set; defaulting to secure",
        ),
    }
}

fn same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(raw) = value else {
        return debug_default(
            mode,
            default_same_site,
            SessionConfigError::Missing {
                name: "session_same_site",
            },
            "session_same_site not set; using default",
        );
    };

    match raw.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_default(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            "session same-site None without secure cookies; browsers may reject the cookie",
        ),
        _ => debug_default(
            mode,
            default_same_site,
            SessionConfigError::Invalid {
                name: "session_same_site",
                value: raw.to_owned(),
                expected: SAMESITE_EXPECTED,
            },
            "invalid session_same_site; using default",
        ),
    }
}

fn allow_ephemeral(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(SessionConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None => debug_default(
            mode,
            false,
            SessionConfigError::Missing {
                name: "session_allow_ephemeral",
            },
            "session_allow_ephemeral not set; defaulting to disabled",
        ),
    }
}

fn session_key(path: &Path, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = match mode {
                BuildMode::Release => SESSION_KEY_MIN_LEN,
                BuildMode::Debug => KEY_DERIVE_MIN_LEN,
            };
            if length < min_len {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
