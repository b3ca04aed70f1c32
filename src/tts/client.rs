//! TTS (Text-to-Speech) client.

use super::types::{
    EncodedAudio, SpeechOutcome, Synthesis, SynthesisRequest, TextToSpeechBody, Voice,
};
use crate::audio;
use crate::config::{ClientConfig, VoicePresets};
use crate::quota::{self, UsageSnapshot};
use crate::transport::HttpTransport;
use crate::Result;
use tracing::{info, warn};

const AUDIO_MPEG: &str = "audio/mpeg";

/// Quota-aware client for the provider's text-to-speech endpoint.
///
/// All calls block the current thread.
pub struct SpeechClient {
    transport: HttpTransport,
    config: ClientConfig,
}

impl SpeechClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport, config })
    }

    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn voices(&self) -> &VoicePresets {
        self.config.voices()
    }

    /// Current character usage for the account. Always a fresh lookup.
    pub fn usage(&self) -> Result<UsageSnapshot> {
        quota::fetch_usage(&self.transport)
    }

    /// Fetch usage and fail with [`crate::Error::QuotaExceeded`] if `text` would not fit.
    pub fn check_quota(&self, text: &str) -> Result<UsageSnapshot> {
        let usage = self.usage()?;
        quota::check_character_limit(text, &usage)?;
        Ok(usage)
    }

    pub fn resolve_voice<'a>(&'a self, voice: &'a Voice) -> Result<&'a str> {
        match voice {
            Voice::Preset(name) => self.config.voices().voice_id(name),
            Voice::Id(id) => Ok(id),
        }
    }

    /// Convert the request's text to speech.
    ///
    /// Returns [`Synthesis::Skipped`] without any network traffic when the
    /// output file exists and `overwrite` is off. Otherwise the quota is checked
    /// first and nothing is sent to the synthesis endpoint if it would be exceeded.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<Synthesis> {
        if request.output_path.exists() && !request.overwrite {
            info!(
                path = %request.output_path.display(),
                "output file already exists, skipping audio generation"
            );
            return Ok(Synthesis::Skipped {
                path: request.output_path.clone(),
            });
        }

        let voice_id = self.resolve_voice(&request.voice)?;
        self.check_quota(&request.text)?;

        let path = format!("/v1/text-to-speech/{}", voice_id);
        let body = TextToSpeechBody::from(request);
        let audio = self
            .transport
            .post_json_for_bytes(&path, &body, AUDIO_MPEG)
            .map_err(|e| {
                warn!(voice_id, error = %e, "text-to-speech request failed");
                e
            })?;

        info!(
            voice_id,
            model_id = %request.model_id,
            bytes = audio.len(),
            "received synthesized audio"
        );
        Ok(Synthesis::Audio(EncodedAudio::encode(&audio)))
    }

    /// [`SpeechClient::synthesize`], then persist the audio at the request's output path.
    ///
    /// An unusable chunk size is rejected before the quota lookup, so it never costs a request.
    pub fn synthesize_to_file(&self, request: &SynthesisRequest) -> Result<SpeechOutcome> {
        audio::check_chunk_size(request.chunk_size)?;

        match self.synthesize(request)? {
            Synthesis::Skipped { path } => Ok(SpeechOutcome::Skipped { path }),
            Synthesis::Audio(audio) => {
                let summary = audio.write_to(&request.output_path, request.chunk_size)?;
                Ok(SpeechOutcome::Written {
                    path: request.output_path.clone(),
                    summary,
                })
            }
        }
    }
}

pub struct SpeechClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    voices: Vec<(String, String)>,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: None,
            voices: Vec::new(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Register an extra voice preset (or replace a built-in one).
    pub fn voice(mut self, name: impl Into<String>, voice_id: impl Into<String>) -> Self {
        self.voices.push((name.into(), voice_id.into()));
        self
    }

    /// Build the client. Without an explicit key, configuration is read from the environment.
    pub fn build(self) -> Result<SpeechClient> {
        let mut config = match self.api_key {
            Some(key) => ClientConfig::new(key),
            None => ClientConfig::from_env()?,
        };
        if let Some(url) = self.base_url {
            config = config.with_base_url(url)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        for (name, id) in self.voices {
            config = config.with_voice(name, id);
        }
        SpeechClient::new(config)
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
