use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use inquiry_providers::EMAILJS_API_BASE_URL;
use inquiry_types::{
    DispatchConfig, PLACEHOLDER_PUBLIC_KEY, PLACEHOLDER_SERVICE_ID, PLACEHOLDER_TEMPLATE_ID,
    PublicKey, PurposeOptions,
};

const DEFAULT_SUCCESS_HIDE_MS: u64 = 5000;

const fn default_success_hide_ms() -> u64 {
    DEFAULT_SUCCESS_HIDE_MS
}

#[derive(Debug, Default, Deserialize)]
pub struct InquiryConfig {
    pub emailjs: Option<EmailJsConfig>,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// EmailJS credentials and endpoint.
///
/// ```toml
/// [emailjs]
/// public_key = "${EMAILJS_PUBLIC_KEY}"
/// service_id = "service_xxx"
/// template_id = "template_xxx"
/// api_base = "https://api.emailjs.com"
/// request_timeout_secs = 20
/// ```
#[derive(Default, Deserialize)]
pub struct EmailJsConfig {
    pub public_key: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub api_base: Option<String>,
    /// Whole-request timeout. Unset means only the connect phase is bounded.
    pub request_timeout_secs: Option<u64>,
}

// Manual Debug impl to prevent leaking the public key in logs.
impl std::fmt::Debug for EmailJsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsConfig")
            .field(
                "public_key",
                &if self.public_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Contact form behaviour.
///
/// ```toml
/// [form]
/// purposes = ["invest", "rent", "design"]
/// success_hide_ms = 5000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub purposes: PurposeOptions,
    #[serde(default = "default_success_hide_ms")]
    pub success_hide_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            purposes: PurposeOptions::default(),
            success_hide_ms: DEFAULT_SUCCESS_HIDE_MS,
        }
    }
}

impl FormConfig {
    #[must_use]
    pub fn success_hide_after(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }
}

/// Scroll and reveal tuning, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Navbar gets `scrolled` once the page is scrolled past this.
    pub scroll_threshold: f64,
    /// A section counts as current this far before its top reaches the viewport top.
    pub section_offset: f64,
    /// Fixed header height subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Fraction of an element that must be visible before it fades in.
    pub reveal_threshold: f64,
    /// Viewport bottom edge is pulled up by this much for reveal checks.
    pub reveal_bottom_margin: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            section_offset: 100.0,
            header_offset: 70.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
        }
    }
}

/// Expand `${VAR}` references from the environment. Unset variables become empty.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn resolved(value: Option<&String>, placeholder: &str) -> String {
    value
        .map(|v| expand_env_vars(v))
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

impl InquiryConfig {
    /// Load from the default location. `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Credentials with `${VAR}` references expanded. Missing values fall back to the
    /// `YOUR_*` placeholders so the dispatcher reports them as unconfigured.
    #[must_use]
    pub fn dispatch_config(&self) -> DispatchConfig {
        let emailjs = self.emailjs.as_ref();
        DispatchConfig::new(
            PublicKey::new(resolved(
                emailjs.and_then(|c| c.public_key.as_ref()),
                PLACEHOLDER_PUBLIC_KEY,
            )),
            resolved(
                emailjs.and_then(|c| c.service_id.as_ref()),
                PLACEHOLDER_SERVICE_ID,
            ),
            resolved(
                emailjs.and_then(|c| c.template_id.as_ref()),
                PLACEHOLDER_TEMPLATE_ID,
            ),
        )
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        self.emailjs
            .as_ref()
            .and_then(|c| c.api_base.as_deref())
            .filter(|base| !base.trim().is_empty())
            .unwrap_or(EMAILJS_API_BASE_URL)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.emailjs
            .as_ref()
            .and_then(|c| c.request_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".inquiry").join("config.toml"))
}
