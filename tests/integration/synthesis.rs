//! Synthesis, idempotent output handling and persistence

use crate::integration::mock_server::{fake_audio, MockServerFixture, LUKE_ID};
use elevenlabs_speech::{Error, SpeechClient, SpeechOutcome, Synthesis, SynthesisRequest};
use mockito::Matcher;

#[test]
fn writes_synthesized_audio_in_chunks() {
    let mut fixture = MockServerFixture::new();
    let audio = fake_audio(1025);
    let usage = fixture.mock_usage(9000, 10000, 1);
    let synthesis = fixture.mock_synthesis(LUKE_ID, &audio, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speech.mp3");
    let request = SynthesisRequest::new("a".repeat(500)).output_path(&path);

    let outcome = fixture.client().synthesize_to_file(&request).unwrap();
    match outcome {
        SpeechOutcome::Written { path: written, summary } => {
            assert_eq!(written, path);
            assert_eq!(summary.bytes, 1025);
            assert_eq!(summary.chunks, 2);
        }
        other => panic!("expected a write, got {other:?}"),
    }
    assert_eq!(std::fs::read(&path).unwrap(), audio);
    usage.assert();
    synthesis.assert();
}

#[test]
fn request_body_carries_text_model_and_settings() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 10000, 1);
    let mock = fixture
        .server
        .mock("POST", "/v1/text-to-speech/9fT2atdGVNMs9eOSAEWZ")
        .match_body(Matcher::Json(serde_json::json!({
            "text": "Good evening.",
            "model_id": "eleven_multilingual_v2",
            "voice_settings": {"stability": 0.25, "similarity_boost": 0.75}
        })))
        .with_status(200)
        .with_body(b"ID3")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("Good evening.")
        .voice("knightly")
        .model_id("eleven_multilingual_v2")
        .stability(0.25)
        .similarity_boost(0.75)
        .output_path(dir.path().join("knightly.mp3"));

    let result = fixture.client().synthesize(&request).unwrap();
    assert_eq!(result.audio().unwrap().decode().unwrap(), b"ID3");
    mock.assert();
}

#[test]
fn synthesize_returns_base64_audio_without_writing() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 100, 1);
    let _synthesis = fixture.mock_synthesis(LUKE_ID, &[0xFF, 0xFB, 0x90, 0x00], 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unwritten.mp3");
    let request = SynthesisRequest::new("hello").output_path(&path);

    let result = fixture.client().synthesize(&request).unwrap();
    assert_eq!(result.audio().unwrap().as_str(), "//uQAA==");
    assert!(!path.exists());
}

#[test]
fn second_call_with_existing_file_is_a_no_op() {
    let mut fixture = MockServerFixture::new();
    let audio = fake_audio(300);
    let usage = fixture.mock_usage(0, 10000, 1);
    let synthesis = fixture.mock_synthesis(LUKE_ID, &audio, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("once.mp3");
    let request = SynthesisRequest::new("only once").output_path(&path);
    let client = fixture.client();

    let first = client.synthesize_to_file(&request).unwrap();
    assert!(matches!(first, SpeechOutcome::Written { .. }));

    let second = client.synthesize_to_file(&request).unwrap();
    assert_eq!(second, SpeechOutcome::Skipped { path: path.clone() });
    assert_eq!(std::fs::read(&path).unwrap(), audio);

    usage.assert();
    synthesis.assert();
}

#[test]
fn existing_file_skips_quota_lookup_too() {
    let mut fixture = MockServerFixture::new();
    let usage = fixture.mock_usage(0, 10000, 0);
    let synthesis = fixture.mock_any_synthesis(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.mp3");
    std::fs::write(&path, b"keep me").unwrap();

    let result = fixture
        .client()
        .synthesize(&SynthesisRequest::new("text").output_path(&path))
        .unwrap();
    assert!(result.is_skipped());
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    usage.assert();
    synthesis.assert();
}

#[test]
fn overwrite_replaces_existing_file() {
    let mut fixture = MockServerFixture::new();
    let audio = fake_audio(2048);
    let usage = fixture.mock_usage(0, 10000, 1);
    let synthesis = fixture.mock_synthesis(LUKE_ID, &audio, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replace.mp3");
    std::fs::write(&path, b"stale audio").unwrap();

    let request = SynthesisRequest::new("fresh")
        .output_path(&path)
        .overwrite(true);
    let outcome = fixture.client().synthesize_to_file(&request).unwrap();

    assert!(matches!(outcome, SpeechOutcome::Written { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), audio);
    usage.assert();
    synthesis.assert();
}

#[test]
fn quota_violation_blocks_the_synthesis_call() {
    let mut fixture = MockServerFixture::new();
    let usage = fixture.mock_usage(9800, 10000, 1);
    let synthesis = fixture.mock_any_synthesis(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocked.mp3");
    let request = SynthesisRequest::new("a".repeat(500)).output_path(&path);

    let err = fixture.client().synthesize_to_file(&request).unwrap_err();
    assert!(err.is_quota_exceeded());
    let message = err.to_string();
    assert!(message.contains("9800"));
    assert!(message.contains("10300"));
    assert!(!path.exists());
    usage.assert();
    synthesis.assert();
}

#[test]
fn provider_error_is_a_typed_failure() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 10000, 1);
    let synthesis = fixture.mock_synthesis_error(
        LUKE_ID,
        422,
        r#"{"detail":[{"msg":"value is not a valid float"}]}"#,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("failed.mp3");
    let request = SynthesisRequest::new("hello").output_path(&path);

    let err = fixture.client().synthesize_to_file(&request).unwrap_err();
    match &err {
        Error::Remote {
            status, message, ..
        } => {
            assert_eq!(*status, 422);
            assert!(message.contains("not a valid float"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(err.class(), Some("invalid_request"));
    assert!(!path.exists());
    synthesis.assert();
}

#[test]
fn explicit_voice_id_bypasses_presets() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 10000, 1);
    let synthesis = fixture.mock_synthesis("customVoice123", b"audio", 1);

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("hi")
        .voice_id("customVoice123")
        .output_path(dir.path().join("custom.mp3"));

    fixture.client().synthesize_to_file(&request).unwrap();
    synthesis.assert();
}

#[test]
fn unknown_preset_fails_before_any_network_call() {
    let mut fixture = MockServerFixture::new();
    let usage = fixture.mock_usage(0, 10000, 0);
    let synthesis = fixture.mock_any_synthesis(0);

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("hi")
        .voice("NOBODY")
        .output_path(dir.path().join("nobody.mp3"));

    let err = fixture.client().synthesize(&request).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got {err:?}");
    usage.assert();
    synthesis.assert();
}

#[test]
fn builder_registers_extra_presets() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 10000, 1);
    let synthesis = fixture.mock_synthesis("narratorVoiceId", b"audio", 1);

    let client: SpeechClient = SpeechClient::builder()
        .api_key(crate::integration::mock_server::API_KEY)
        .base_url(&fixture.base_url)
        .voice("narrator", "narratorVoiceId")
        .build()
        .unwrap();
    assert_eq!(client.voices().len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("Once upon a time")
        .voice("NARRATOR")
        .output_path(dir.path().join("story.mp3"));
    let result = client.synthesize(&request).unwrap();
    assert!(matches!(result, Synthesis::Audio(_)));
    synthesis.assert();
}

#[test]
fn missing_output_directory_is_reported_after_synthesis() {
    let mut fixture = MockServerFixture::new();
    let _usage = fixture.mock_usage(0, 10000, 1);
    let _synthesis = fixture.mock_synthesis(LUKE_ID, b"audio", 1);

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("hi")
        .output_path(dir.path().join("no-such-dir").join("out.mp3"));

    let err = fixture.client().synthesize_to_file(&request).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[test]
fn zero_chunk_size_fails_before_any_network_call() {
    let mut fixture = MockServerFixture::new();
    let usage = fixture.mock_usage(0, 10000, 0);
    let synthesis = fixture.mock_any_synthesis(0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.mp3");
    let request = SynthesisRequest::new("hi").output_path(&path).chunk_size(0);

    let err = fixture.client().synthesize_to_file(&request).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got {err:?}");
    assert!(!path.exists());
    usage.assert();
    synthesis.assert();
}
