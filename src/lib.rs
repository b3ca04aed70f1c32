//! # elevenlabs-speech
//!
//! 额度感知的 ElevenLabs 文字转语音客户端：合成前检查字符额度，并将音频写入磁盘。
//!
//! Quota-aware client for the ElevenLabs text-to-speech API.
//!
//! ## Overview
//!
//! Each synthesis goes through three sequential steps:
//!
//! 1. **Usage lookup**: `GET /v1/user` for the characters used this period and the limit
//! 2. **Quota guard**: refuse locally if `used + len(text) > limit`, before anything is billed
//! 3. **Synthesis + persistence**: `POST /v1/text-to-speech/{voice_id}`, then write the
//!    audio to disk in fixed-size chunks
//!
//! If the output file already exists and overwrite is off, all three steps are skipped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elevenlabs_speech::{ClientConfig, SpeechClient, SpeechOutcome, SynthesisRequest};
//!
//! fn main() -> elevenlabs_speech::Result<()> {
//!     let client = SpeechClient::new(ClientConfig::from_env()?)?;
//!
//!     let request = SynthesisRequest::new("Hello from Rust.")
//!         .voice("KNIGHTLY")
//!         .output_path("hello.mp3");
//!
//!     match client.synthesize_to_file(&request)? {
//!         SpeechOutcome::Skipped { path } => println!("{} already exists", path.display()),
//!         SpeechOutcome::Written { path, summary } => {
//!             println!("wrote {} bytes to {}", summary.bytes, path.display())
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credential, endpoint and voice presets |
//! | [`quota`] | Usage lookup and the character-limit guard |
//! | [`tts`] | Synthesis client and request/response types |
//! | [`audio`] | Base64 transport encoding and chunked file output |
//! | [`transport`] | Blocking HTTP transport |

pub mod audio;
pub mod config;
pub mod quota;
pub mod transport;
pub mod tts;

// Re-export main types for convenience
pub use config::{ClientConfig, VoicePreset, VoicePresets};
pub use quota::{check_character_limit, QuotaExceeded, UsageSnapshot};
pub use tts::{
    EncodedAudio, SpeechClient, SpeechClientBuilder, SpeechOutcome, Synthesis, SynthesisRequest,
    Voice, VoiceSettings,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
