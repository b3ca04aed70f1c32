//! TTS（文字转语音）模块：调用 ElevenLabs 接口将文本合成为音频，合成前检查字符额度。

mod client;
mod types;

pub use client::{SpeechClient, SpeechClientBuilder};
pub use types::{
    EncodedAudio, SpeechOutcome, Synthesis, SynthesisRequest, Voice, VoiceSettings,
    DEFAULT_MODEL_ID, DEFAULT_OUTPUT_FILE, DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY,
};
