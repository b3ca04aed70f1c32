//! TTS (Text-to-Speech) types.

use crate::audio::{self, WriteSummary, DEFAULT_CHUNK_SIZE};
use crate::config::DEFAULT_VOICE;
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";
pub const DEFAULT_STABILITY: f64 = 0.5;
pub const DEFAULT_SIMILARITY_BOOST: f64 = 0.5;
pub const DEFAULT_OUTPUT_FILE: &str = "output.mp3";

/// Voice tuning sent with every synthesis request.
///
/// Both values are conceptually in `[0, 1]`; the provider validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
        }
    }
}

/// Which voice to synthesize with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voice {
    /// A named preset, resolved against the client's [`crate::config::VoicePresets`].
    Preset(String),
    /// A provider voice identifier, used as-is.
    Id(String),
}

impl Default for Voice {
    fn default() -> Self {
        Voice::Preset(DEFAULT_VOICE.to_string())
    }
}

/// One text-to-speech conversion and where its audio should land.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: Voice,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    pub output_path: PathBuf,
    pub overwrite: bool,
    pub chunk_size: usize,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: Voice::default(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_settings: VoiceSettings::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            overwrite: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn voice(mut self, preset: impl Into<String>) -> Self {
        self.voice = Voice::Preset(preset.into());
        self
    }

    pub fn voice_id(mut self, id: impl Into<String>) -> Self {
        self.voice = Voice::Id(id.into());
        self
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn stability(mut self, stability: f64) -> Self {
        self.voice_settings.stability = stability;
        self
    }

    pub fn similarity_boost(mut self, similarity_boost: f64) -> Self {
        self.voice_settings.similarity_boost = similarity_boost;
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// JSON body of `POST /v1/text-to-speech/{voice_id}`.
#[derive(Debug, Serialize)]
pub(crate) struct TextToSpeechBody<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

impl<'a> From<&'a SynthesisRequest> for TextToSpeechBody<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            text: &request.text,
            model_id: &request.model_id,
            voice_settings: request.voice_settings,
        }
    }
}

/// Audio bytes in their base64 transport representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio(String);

impl EncodedAudio {
    pub fn encode(bytes: &[u8]) -> Self {
        Self(audio::encode_base64(bytes))
    }

    /// Wrap an existing base64 string. Validity is checked on [`EncodedAudio::decode`].
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        audio::decode_base64(&self.0)
    }

    /// Decode and write to `path` in `chunk_size` pieces.
    pub fn write_to(&self, path: &Path, chunk_size: usize) -> Result<WriteSummary> {
        audio::write_base64_audio(&self.0, path, chunk_size)
    }
}

impl AsRef<str> for EncodedAudio {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of [`crate::SpeechClient::synthesize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    /// The output file already existed and overwrite was off; nothing was requested.
    Skipped { path: PathBuf },
    Audio(EncodedAudio),
}

impl Synthesis {
    pub fn audio(&self) -> Option<&EncodedAudio> {
        match self {
            Synthesis::Audio(audio) => Some(audio),
            Synthesis::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Synthesis::Skipped { .. })
    }
}

/// Result of [`crate::SpeechClient::synthesize_to_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Skipped { path: PathBuf },
    Written { path: PathBuf, summary: WriteSummary },
}
