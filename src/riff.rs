//! RIFF chunk stream codec.
//!
//! Decodes a RIFF container into its ordered chunk list, lets callers insert a
//! chunk right after the first `fmt ` chunk, and re-encodes the list with a
//! freshly computed container size. Chunk payloads are opaque bytes; nothing
//! here interprets audio data.

use crate::constants::{CHUNK_HEADER_SIZE, FMT_TAG, RIFF_HEADER_SIZE, RIFF_TAG, WAVE_TAG};
use crate::error::{AigcError, Result};
use std::borrow::Cow;

/// A single tagged chunk.
///
/// `declared_len` is the wire length without the pad byte, so it always
/// equals `payload.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    tag: Vec<u8>,
    declared_len: u32,
    payload: Vec<u8>,
}

impl Chunk {
    /// Build a chunk from a tag and payload.
    ///
    /// The tag is not checked here; a tag that is not four bytes is reported
    /// by [`RiffFile::encode`].
    pub fn new(tag: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Result<Self> {
        let payload = payload.into();
        let declared_len = u32::try_from(payload.len()).map_err(|_| AigcError::TooLarge {
            size: payload.len() as u64,
        })?;
        Ok(Self {
            tag: tag.into(),
            declared_len,
            payload,
        })
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Tag as text, lossy for non-ASCII bytes
    pub fn tag_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.tag)
    }

    pub fn declared_len(&self) -> u32 {
        self.declared_len
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether a pad byte follows the payload on the wire
    pub fn is_padded(&self) -> bool {
        self.declared_len % 2 == 1
    }

    /// Bytes this chunk occupies when encoded: header, payload and pad
    pub fn encoded_size(&self) -> u64 {
        CHUNK_HEADER_SIZE as u64 + self.declared_len as u64 + self.is_padded() as u64
    }

    fn has_tag(&self, tag: &[u8]) -> bool {
        self.tag == tag
    }
}

/// A decoded RIFF container: the two outer tags and every chunk in file order.
///
/// The size field of the input header is not kept. It is derived from the
/// chunk list every time the container is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiffFile {
    form_tag: [u8; 4],
    format_tag: [u8; 4],
    chunks: Vec<Chunk>,
}

impl Default for RiffFile {
    fn default() -> Self {
        Self::new(*RIFF_TAG, *WAVE_TAG)
    }
}

impl RiffFile {
    pub fn new(form_tag: [u8; 4], format_tag: [u8; 4]) -> Self {
        Self {
            form_tag,
            format_tag,
            chunks: Vec::new(),
        }
    }

    /// Decode a complete container held in memory.
    ///
    /// Fewer than eight trailing bytes end the chunk list without error. A
    /// chunk whose declared length runs past the end of the input fails with
    /// [`AigcError::TruncatedChunk`]. Pad bytes are skipped unchecked, and a
    /// pad byte missing at the very end of the input is tolerated.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < RIFF_HEADER_SIZE {
            return Err(AigcError::TruncatedHeader {
                available: bytes.len(),
            });
        }

        let form_tag = read_fourcc(&bytes[0..4]);
        // bytes[4..8] hold the declared container size, recomputed on encode
        let format_tag = read_fourcc(&bytes[8..12]);

        let mut chunks = Vec::new();
        let mut pos = RIFF_HEADER_SIZE;

        while bytes.len() - pos >= CHUNK_HEADER_SIZE {
            let tag = bytes[pos..pos + 4].to_vec();
            let declared = read_u32_le(&bytes[pos + 4..pos + 8]);
            pos += CHUNK_HEADER_SIZE;

            let available = bytes.len() - pos;
            let len = declared as usize;
            if len > available {
                return Err(AigcError::TruncatedChunk {
                    index: chunks.len(),
                    tag: String::from_utf8_lossy(&tag).into_owned(),
                    declared,
                    available,
                });
            }

            let payload = bytes[pos..pos + len].to_vec();
            pos += len;

            // Pad byte if chunk size is odd
            if declared % 2 == 1 {
                pos = (pos + 1).min(bytes.len());
            }

            chunks.push(Chunk {
                tag,
                declared_len: declared,
                payload,
            });
        }

        Ok(Self {
            form_tag,
            format_tag,
            chunks,
        })
    }

    pub fn form_tag(&self) -> &[u8; 4] {
        &self.form_tag
    }

    pub fn format_tag(&self) -> &[u8; 4] {
        &self.format_tag
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// First chunk carrying `tag`
    pub fn find(&self, tag: &[u8]) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.has_tag(tag))
    }

    /// Insert a chunk immediately after the first `fmt ` chunk.
    ///
    /// Returns `false` and leaves the list untouched when there is no `fmt `
    /// chunk. Later `fmt ` chunks never trigger a second insertion.
    pub fn insert_after_format(&mut self, chunk: Chunk) -> bool {
        match self.chunks.iter().position(|c| c.has_tag(FMT_TAG)) {
            Some(fmt_index) => {
                self.chunks.insert(fmt_index + 1, chunk);
                true
            }
            None => false,
        }
    }

    /// Remove every chunk carrying `tag`, keeping the order of the rest.
    /// Returns how many were removed.
    pub fn remove_all(&mut self, tag: &[u8]) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|c| !c.has_tag(tag));
        before - self.chunks.len()
    }

    /// Container size field: the format tag plus every encoded chunk
    pub fn total_size(&self) -> u64 {
        4 + self.chunks.iter().map(Chunk::encoded_size).sum::<u64>()
    }

    /// Encode the container, emitting a zero pad byte after every odd-length
    /// payload.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let total_size = self.total_size();
        let size_field =
            u32::try_from(total_size).map_err(|_| AigcError::TooLarge { size: total_size })?;

        let mut out = Vec::with_capacity(total_size as usize + 8);
        out.extend_from_slice(&self.form_tag);
        write_u32_le(&mut out, size_field);
        out.extend_from_slice(&self.format_tag);

        for (index, chunk) in self.chunks.iter().enumerate() {
            if chunk.tag.len() != 4 {
                return Err(AigcError::UnencodableTag {
                    index,
                    tag: chunk.tag_str().into_owned(),
                });
            }
            out.extend_from_slice(&chunk.tag);
            write_u32_le(&mut out, chunk.declared_len);
            out.extend_from_slice(&chunk.payload);
            if chunk.is_padded() {
                out.push(0);
            }
        }

        Ok(out)
    }
}

/// Copy a 4-byte slice into a chunk ID
fn read_fourcc(bytes: &[u8]) -> [u8; 4] {
    let mut id = [0u8; 4];
    id.copy_from_slice(&bytes[..4]);
    id
}

/// Read a 4-byte little-endian size
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(read_fourcc(bytes))
}

/// Write a 4-byte little-endian size
fn write_u32_le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
