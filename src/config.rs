//! Client configuration: credential, endpoint and the named voice presets.
//!
//! Configuration is an explicit value. Build it once (usually with
//! [`ClientConfig::from_env`]) and hand it to [`crate::SpeechClient::new`].

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::env;
use std::fmt;
use url::Url;

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "ELEVEN_LABS_API_KEY";
/// Optional override of the provider base URL.
pub const BASE_URL_ENV: &str = "ELEVEN_LABS_BASE_URL";
/// Optional override of the HTTP timeout, in seconds.
pub const TIMEOUT_ENV: &str = "ELEVEN_LABS_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Preset used when a request does not name a voice.
pub const DEFAULT_VOICE: &str = "LUKE";

const KEYRING_SERVICE: &str = "elevenlabs";
const KEYRING_USER: &str = "api-key";

const BUILTIN_VOICES: [(&str, &str, &str); 3] = [
    ("LUKE", "hebTAnd8Ry07PXF07TBK", "Young American Male"),
    ("KNIGHTLY", "9fT2atdGVNMs9eOSAEWZ", "Old British Male"),
    ("DAN", "OZCcpR3NOKIgWxketgTO", "Young American Male"),
];

/// A human-readable name bound to a provider voice identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePreset {
    pub name: String,
    pub voice_id: String,
    pub description: Option<String>,
}

/// Table of voice presets. Names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePresets {
    presets: Vec<VoicePreset>,
}

impl VoicePresets {
    pub fn empty() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    /// Add a preset, replacing any existing preset with the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        voice_id: impl Into<String>,
        description: Option<String>,
    ) {
        let name = name.into().to_uppercase();
        let preset = VoicePreset {
            name,
            voice_id: voice_id.into(),
            description,
        };
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VoicePreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a preset name to its provider voice identifier.
    pub fn voice_id(&self, name: &str) -> Result<&str> {
        self.get(name).map(|p| p.voice_id.as_str()).ok_or_else(|| {
            let known: Vec<&str> = self.presets.iter().map(|p| p.name.as_str()).collect();
            Error::validation_with_context(
                format!("Unknown voice preset '{}'", name),
                ErrorContext::new()
                    .with_field_path("voice")
                    .with_details(format!("known presets: {}", known.join(", "))),
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoicePreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for VoicePresets {
    fn default() -> Self {
        let mut presets = Self::empty();
        for (name, id, description) in BUILTIN_VOICES {
            presets.insert(name, id, Some(description.to_string()));
        }
        presets
    }
}

/// Everything a [`crate::SpeechClient`] needs to talk to the provider.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    voices: VoicePresets,
}

impl ClientConfig {
    /// Configuration with the given key and all other values at their defaults.
    ///
    /// The key is not validated locally.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            voices: VoicePresets::default(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// The key comes from `ELEVEN_LABS_API_KEY`, falling back to the OS keyring.
    /// `ELEVEN_LABS_BASE_URL` and `ELEVEN_LABS_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// [`ClientConfig::from_env`] over an arbitrary variable source.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .or_else(keyring_api_key)
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key required",
                    ErrorContext::new()
                        .with_field_path(API_KEY_ENV)
                        .with_details("set the environment variable or store it in the keyring")
                        .with_source("config"),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(base_url)?;
        }
        if let Some(value) = lookup(TIMEOUT_ENV) {
            config = config.with_timeout_secs(parse_timeout_secs(&value)?);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url.clone()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url),
            ));
        }
        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_voice(mut self, name: impl Into<String>, voice_id: impl Into<String>) -> Self {
        self.voices.insert(name, voice_id, None);
        self
    }

    pub fn with_voices(mut self, voices: VoicePresets) -> Self {
        self.voices = voices;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn voices(&self) -> &VoicePresets {
        &self.voices
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("voices", &self.voices.len())
            .finish()
    }
}

/// Timeout override: a whole number of seconds, at least 1.
fn parse_timeout_secs(value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        Ok(_) => Err(Error::configuration_with_context(
            "Timeout must be at least one second",
            ErrorContext::new()
                .with_field_path(TIMEOUT_ENV)
                .with_details(value),
        )),
        Err(e) => Err(Error::configuration_with_context(
            format!("Invalid timeout: {}", e),
            ErrorContext::new()
                .with_field_path(TIMEOUT_ENV)
                .with_details(value),
        )),
    }
}

fn keyring_api_key() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok()
}
