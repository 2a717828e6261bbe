use approx::assert_abs_diff_eq;
use std::fs;
use tempfile::TempDir;
use voice_enhancer::audio::{collect_audio_files, decode_file, write_wav};
use voice_enhancer::export::{write_json, ReportEntry};
use voice_enhancer::{analyze, enhance, EnhancementConfig, SampleBuffer};

fn test_buffer() -> SampleBuffer {
    let left: Vec<f32> = (0..4800)
        .map(|i| 0.4 * (2.0 * std::f32::consts::PI * 300.0 * i as f32 / 48000.0).sin())
        .collect();
    let right: Vec<f32> = left.iter().map(|s| -0.5 * s).collect();
    SampleBuffer::new(vec![left, right], 48000)
}

#[test]
fn test_wav_round_trip_preserves_shape_and_samples() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("out/take.wav");

    let buffer = test_buffer();
    write_wav(&path, &buffer).expect("Failed to write WAV");
    assert!(path.exists());

    let decoded = decode_file(&path).expect("Failed to decode WAV");
    assert_eq!(decoded.sample_rate, 48000);
    assert_eq!(decoded.num_channels(), 2);
    assert_eq!(decoded.len(), buffer.len());

    for (a, b) in decoded.channels[1].iter().zip(&buffer.channels[1]) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
    }
}

#[test]
fn test_enhance_file_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("in.wav");
    let output = temp_dir.path().join("enhanced.wav");

    write_wav(&input, &test_buffer()).unwrap();

    let buffer = decode_file(&input).unwrap();
    let config = EnhancementConfig::new()
        .with_compression(60.0)
        .with_normalize(true);
    let enhanced = enhance(&buffer, &config).unwrap();
    write_wav(&output, &enhanced).unwrap();

    let reread = decode_file(&output).unwrap();
    assert_abs_diff_eq!(reread.peak(), 0.95, epsilon = 1e-4);
}

#[test]
fn test_batch_reports_written_as_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_wav(&temp_dir.path().join("a.wav"), &test_buffer()).unwrap();
    write_wav(&temp_dir.path().join("b.wav"), &test_buffer()).unwrap();
    fs::write(temp_dir.path().join("notes.txt"), b"not audio").unwrap();

    let files = collect_audio_files(temp_dir.path());
    assert_eq!(files.len(), 2);

    let entries: Vec<ReportEntry> = files
        .iter()
        .map(|f| {
            let buffer = decode_file(f).unwrap();
            let report = analyze(&buffer).unwrap();
            ReportEntry::new(f, &buffer, report)
        })
        .collect();

    let json_path = temp_dir.path().join("reports.json");
    write_json(&json_path, &entries).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let array = parsed.as_array().expect("reports should be an array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["sampleRate"], 48000);
    assert_eq!(array[0]["channels"], 2);
    assert!(array[0]["report"]["quality"]["overallScore"].is_number());
}
