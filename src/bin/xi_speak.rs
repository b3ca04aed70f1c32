//! xi-speak — ElevenLabs 文字转语音命令行工具
//!
//! Usage:
//!   xi-speak usage                                  Show character usage and limit
//!   xi-speak voices                                 List voice presets
//!   xi-speak speak "Hello" --voice DAN -o hi.mp3    Synthesize text to a file
//!   xi-speak decode audio.b64 -o audio.mp3          Write saved base64 audio to a file

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use elevenlabs_speech::audio::{self, DEFAULT_CHUNK_SIZE};
use elevenlabs_speech::config::DEFAULT_VOICE;
use elevenlabs_speech::tts::{
    DEFAULT_MODEL_ID, DEFAULT_OUTPUT_FILE, DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY,
};
use elevenlabs_speech::{ClientConfig, SpeechClient, SpeechOutcome, SynthesisRequest, VoicePresets};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "xi-speak")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Quota-aware ElevenLabs text-to-speech")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show character usage for the current billing period
    Usage,
    /// List the configured voice presets
    Voices,
    /// Synthesize text and write the audio to a file
    Speak(SpeakArgs),
    /// Write a saved base64 audio string to a file
    Decode {
        /// File containing the base64 text
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

#[derive(Args, Debug)]
struct SpeakArgs {
    /// Text to synthesize
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Voice preset name
    #[arg(long, default_value = DEFAULT_VOICE, conflicts_with = "voice_id")]
    voice: String,

    /// Provider voice identifier (bypasses the presets)
    #[arg(long, value_name = "ID")]
    voice_id: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    model: String,

    #[arg(long, default_value_t = DEFAULT_STABILITY)]
    stability: f64,

    #[arg(long, default_value_t = DEFAULT_SIMILARITY_BOOST)]
    similarity_boost: f64,

    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Replace the output file if it already exists
    #[arg(long)]
    overwrite: bool,

    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Usage => cmd_usage(),
        Command::Voices => cmd_voices(),
        Command::Speak(args) => cmd_speak(args),
        Command::Decode {
            input,
            output,
            chunk_size,
        } => cmd_decode(input, output, chunk_size),
    }
}

fn client() -> Result<SpeechClient> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    Ok(SpeechClient::new(config)?)
}

fn cmd_usage() -> Result<()> {
    let usage = client()?.usage()?;
    println!("used:      {}", usage.character_count);
    println!("limit:     {}", usage.character_limit);
    println!("remaining: {}", usage.remaining());
    Ok(())
}

fn cmd_voices() -> Result<()> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    for line in voice_lines(config.voices()) {
        println!("{}", line);
    }
    Ok(())
}

fn voice_lines(presets: &VoicePresets) -> Vec<String> {
    presets
        .iter()
        .map(|preset| match &preset.description {
            Some(description) => {
                format!("{:<10} {}  {}", preset.name, preset.voice_id, description)
            }
            None => format!("{:<10} {}", preset.name, preset.voice_id),
        })
        .collect()
}

fn cmd_speak(args: SpeakArgs) -> Result<()> {
    let text = match (args.text, &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("no text given"),
    };

    let mut request = SynthesisRequest::new(text)
        .model_id(args.model)
        .stability(args.stability)
        .similarity_boost(args.similarity_boost)
        .output_path(args.output)
        .overwrite(args.overwrite)
        .chunk_size(args.chunk_size);
    request = match args.voice_id {
        Some(id) => request.voice_id(id),
        None => request.voice(args.voice),
    };

    match client()?.synthesize_to_file(&request)? {
        SpeechOutcome::Skipped { path } => {
            println!(
                "File already exists at {}. Skipping audio generation...",
                path.display()
            );
        }
        SpeechOutcome::Written { path, summary } => {
            println!("Wrote {} bytes to {}", summary.bytes, path.display());
        }
    }
    Ok(())
}

fn cmd_decode(input: PathBuf, output: PathBuf, chunk_size: usize) -> Result<()> {
    let data = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let summary = audio::write_base64_audio(&data, &output, chunk_size)?;
    println!("Wrote {} bytes to {}", summary.bytes, output.display());
    Ok(())
}
