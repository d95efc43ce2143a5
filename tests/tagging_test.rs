use aigc_tag::aigc::AigcMetadata;
use aigc_tag::riff::RiffFile;
use aigc_tag::{AigcError, tag_with_aigc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_JSON: &str = r#"{"Label":"value1","ContentProducer":"value2","ProduceID":"value3","ReservedCode1":"value4","ContentPropagator":"value5","PropagateID":"value6","ReservedCode2":"value7"}"#;

/// `RIFF`/size/`WAVE`, a 16-byte `fmt ` chunk and an even 100-byte `data` chunk
fn minimal_wave() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(4u32 + 24 + 108).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&100u32.to_le_bytes());
    bytes.extend((0..100u8).map(|i| i.wrapping_mul(7)));
    bytes
}

fn write_input(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_minimal_wave_scenario() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "sample.wav", &minimal_wave());
    let output = dir.path().join("sample_aigc_tag.wav");

    // 121 bytes of UTF-8 JSON
    let payload = r#"{"Label":"1","ContentProducer":"studio","ProduceID":"0123456789abcdef","ContentPropagator":"platform","PropagateID":"xy"}"#;
    assert_eq!(payload.len(), 121);

    let report = tag_with_aigc(&input, &output, payload).unwrap();
    assert!(report.inserted);
    assert_eq!(report.riff_size, 266);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 274);
    assert_eq!(&bytes[4..8], &266u32.to_le_bytes());

    let riff = RiffFile::decode(&bytes).unwrap();
    let layout: Vec<(String, u32)> = riff
        .chunks()
        .iter()
        .map(|c| (c.tag_str().into_owned(), c.declared_len()))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("fmt ".to_string(), 16),
            ("AIGC".to_string(), 121),
            ("data".to_string(), 100),
        ]
    );
    assert_eq!(riff.chunks()[1].payload(), payload.as_bytes());

    // Pad byte directly after the AIGC payload, then the data chunk
    assert_eq!(bytes[12 + 24 + 8 + 121], 0);
    assert_eq!(&bytes[12 + 24 + 130..12 + 24 + 134], b"data");

    // Untouched chunks keep their bytes
    let original = RiffFile::decode(&minimal_wave()).unwrap();
    assert_eq!(riff.chunks()[0], original.chunks()[0]);
    assert_eq!(riff.chunks()[2], original.chunks()[1]);
}

#[test]
fn test_sample_metadata_round_trips() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "sample.wav", &minimal_wave());
    let output = dir.path().join("out.wav");

    tag_with_aigc(&input, &output, SAMPLE_JSON).unwrap();

    let stored = aigc_tag::tagger::read_aigc(&output).unwrap().unwrap();
    assert_eq!(stored, SAMPLE_JSON.as_bytes());
    let meta = AigcMetadata::from_json_bytes(&stored).unwrap();
    assert_eq!(meta.label, "value1");
    assert_eq!(meta.reserved_code2, "value7");
}

#[test]
fn test_truncated_data_chunk_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut bytes = minimal_wave();
    // Declare 1000 bytes of data while only 100 follow
    let data_len_at = 12 + 24 + 4;
    bytes[data_len_at..data_len_at + 4].copy_from_slice(&1000u32.to_le_bytes());
    let input = write_input(dir.path(), "broken.wav", &bytes);
    let output = dir.path().join("out.wav");

    let err = tag_with_aigc(&input, &output, SAMPLE_JSON).unwrap_err();

    match err {
        AigcError::TruncatedChunk {
            index, declared, ..
        } => {
            assert_eq!(index, 1);
            assert_eq!(declared, 1000);
        }
        other => panic!("expected TruncatedChunk, got {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_size_field_is_recomputed() {
    let dir = TempDir::new().unwrap();
    let mut bytes = minimal_wave();
    // A wrong header size must not survive the rewrite
    bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
    let input = write_input(dir.path(), "badsize.wav", &bytes);
    let output = dir.path().join("out.wav");

    tag_with_aigc(&input, &output, "ab").unwrap();

    let out = fs::read(&output).unwrap();
    let declared = u32::from_le_bytes([out[4], out[5], out[6], out[7]]);
    assert_eq!(declared as usize, out.len() - 8);
    assert_eq!(declared as u64, RiffFile::decode(&out).unwrap().total_size());
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.wav");

    let err = tag_with_aigc(&dir.path().join("nope.wav"), &output, "{}").unwrap_err();

    assert!(matches!(err, AigcError::MissingInput { .. }));
    assert!(err.to_string().contains("nope.wav"));
    assert!(!output.exists());
}
