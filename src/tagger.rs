//! File-level AIGC tagging.
//!
//! Composes the RIFF codec into the whole pipeline: validate paths, create a
//! temporary file next to the destination, read the input into memory, insert
//! the `AIGC` chunk after `fmt `, encode, and rename the temporary file over
//! the destination only once every byte is on disk. A symlinked destination
//! is written through to its target, and a replaced file keeps its
//! permissions.

use crate::constants::{AIGC_TAG, DATA_TAG, TEMP_FILE_PREFIX};
use crate::error::{AigcError, Result};
use crate::riff::{Chunk, RiffFile};
use crate::utils::validation::{validate_input_readable, validate_output_writable};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Drop any `AIGC` chunks already present before inserting the new one
    pub replace_existing: bool,
}

/// What a tagging run did to the chunk list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    /// False when the input had no `fmt ` chunk and was passed through
    pub inserted: bool,
    /// Existing `AIGC` chunks dropped under [`TagOptions::replace_existing`]
    pub removed: usize,
    pub chunk_count: usize,
    /// Container size field written to the output
    pub riff_size: u64,
}

/// Write `input` to `output` with an `AIGC` chunk holding `payload` placed
/// right after the first `fmt ` chunk.
///
/// Text payloads are taken as their UTF-8 bytes. `output` may equal `input`.
pub fn tag_with_aigc(input: &Path, output: &Path, payload: impl AsRef<[u8]>) -> Result<TagReport> {
    tag_with_options(input, output, payload, &TagOptions::default())
}

pub fn tag_with_options(
    input: &Path,
    output: &Path,
    payload: impl AsRef<[u8]>,
    options: &TagOptions,
) -> Result<TagReport> {
    validate_input_readable(input)?;
    let output = resolve_output(output);
    let output_dir = validate_output_writable(&output)?;

    // Creating the temp file proves the directory is writable before any
    // input bytes are read
    let (pending, file) = PendingOutput::create(&output_dir)?;

    let mut riff = read_riff(input)?;

    let removed = if options.replace_existing {
        riff.remove_all(AIGC_TAG)
    } else {
        0
    };
    let inserted = riff.insert_after_format(Chunk::new(*AIGC_TAG, payload.as_ref())?);
    let encoded = riff.encode()?;

    write_output(pending, file, &output, &encoded)?;

    Ok(TagReport {
        inserted,
        removed,
        chunk_count: riff.chunks().len(),
        riff_size: riff.total_size(),
    })
}

/// Follow a symlinked output so the rename replaces the file it points to
/// rather than the link itself.
fn resolve_output(output: &Path) -> PathBuf {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf())
        }
        _ => output.to_path_buf(),
    }
}

/// Read and decode a whole RIFF file
pub fn read_riff(path: &Path) -> Result<RiffFile> {
    let bytes = fs::read(path).map_err(|e| AigcError::missing_input(path, e))?;
    RiffFile::decode(&bytes)
}

/// Payload of the first `AIGC` chunk, if the file has one
pub fn read_aigc(path: &Path) -> Result<Option<Vec<u8>>> {
    validate_input_readable(path)?;
    let riff = read_riff(path)?;
    Ok(riff.find(AIGC_TAG).map(|chunk| chunk.payload().to_vec()))
}

/// Hex MD5 of the first `data` chunk payload
pub fn calculate_audio_md5(path: &Path) -> Result<Option<String>> {
    validate_input_readable(path)?;
    let riff = read_riff(path)?;

    Ok(riff.find(DATA_TAG).map(|chunk| {
        let mut context = md5::Context::new();
        context.consume(chunk.payload());
        format!("{:x}", context.finalize())
    }))
}

/// Temp file that deletes itself unless it was renamed into place
struct PendingOutput {
    path: PathBuf,
    persisted: bool,
}

impl PendingOutput {
    fn create(dir: &Path) -> Result<(Self, File)> {
        let path = dir.join(format!(
            "{TEMP_FILE_PREFIX}-{}-{}.wav",
            std::process::id(),
            uuid::Uuid::new_v4().simple()
        ));

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                    AigcError::unwritable(dir, format!("cannot create files: {e}"))
                }
                _ => AigcError::write(&path, e),
            })?;

        Ok((
            Self {
                path,
                persisted: false,
            },
            file,
        ))
    }

    /// Rename over `target`, first giving the temp file the permissions of
    /// the file it replaces
    fn persist(mut self, target: &Path) -> Result<()> {
        if let Ok(existing) = fs::metadata(target) {
            if existing.is_file() {
                fs::set_permissions(&self.path, existing.permissions())
                    .map_err(|e| AigcError::write(target, e))?;
            }
        }
        fs::rename(&self.path, target).map_err(|e| AigcError::write(target, e))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn write_output(pending: PendingOutput, file: File, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| AigcError::write(target, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| AigcError::write(target, e.into_error()))?;
    file.sync_all().map_err(|e| AigcError::write(target, e))?;
    drop(file);

    pending.persist(target)
}
