//! Project-wide constants used across multiple modules.

/// Outer container form tag
pub const RIFF_TAG: &[u8; 4] = b"RIFF";

/// Format tag following the container size field
pub const WAVE_TAG: &[u8; 4] = b"WAVE";

/// WAVE format chunk, the anchor for AIGC insertion
pub const FMT_TAG: &[u8; 4] = b"fmt ";

/// Audio sample data chunk
pub const DATA_TAG: &[u8; 4] = b"data";

/// Provenance chunk inserted after `fmt `
pub const AIGC_TAG: &[u8; 4] = b"AIGC";

/// Size of the `RIFF`/size/`WAVE` header
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk tag plus its length field
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Prefix for in-flight output files, removed or renamed before the call returns
pub const TEMP_FILE_PREFIX: &str = ".aigc-temp";

/// Typical filesystem path length limit
pub const MAX_PATH_LENGTH: usize = 4096;
