//! Audio persistence: base64 transport encoding and chunked file output.
//!
//! Writes are not atomic. A failure midway leaves a partial file behind.

use crate::{Error, ErrorContext, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Chunk size used when the caller has no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Outcome of a completed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub bytes: usize,
    pub chunks: usize,
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 transport string. Surrounding whitespace is ignored.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(data.trim())?)
}

pub(crate) fn check_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::validation_with_context(
            "Chunk size must be greater than zero",
            ErrorContext::new()
                .with_field_path("chunk_size")
                .with_source("audio"),
        ));
    }
    Ok(())
}

/// Write `bytes` to `writer` in `chunk_size` pieces, returning the number of chunks.
pub fn write_chunks<W: Write>(writer: &mut W, bytes: &[u8], chunk_size: usize) -> Result<usize> {
    check_chunk_size(chunk_size)?;

    let mut chunks = 0;
    for chunk in bytes.chunks(chunk_size) {
        writer.write_all(chunk)?;
        chunks += 1;
    }
    writer.flush()?;
    Ok(chunks)
}

/// Create (or truncate) the file at `path` and write `bytes` into it chunk by chunk.
pub fn write_audio(bytes: &[u8], path: &Path, chunk_size: usize) -> Result<WriteSummary> {
    // Before File::create so a bad argument leaves the disk untouched.
    check_chunk_size(chunk_size)?;

    let mut file = File::create(path)?;
    let chunks = write_chunks(&mut file, bytes, chunk_size)?;
    info!(path = %path.display(), bytes = bytes.len(), chunks, "wrote audio file");
    Ok(WriteSummary {
        bytes: bytes.len(),
        chunks,
    })
}

/// Decode base64 audio and write it to `path` in `chunk_size` pieces.
///
/// Malformed input fails before the destination is touched.
pub fn write_base64_audio(data: &str, path: &Path, chunk_size: usize) -> Result<WriteSummary> {
    let bytes = decode_base64(data)?;
    write_audio(&bytes, path, chunk_size)
}
