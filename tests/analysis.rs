use approx::assert_abs_diff_eq;
use voice_enhancer::analysis::spectral::FFT_SIZE;
use voice_enhancer::model::{Emotion, Gender, VoiceType};
use voice_enhancer::{analyze, InvalidBufferError, SampleBuffer};

fn sine(freq: f32, amplitude: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

#[test]
fn test_silent_buffer_metrics() {
    let buffer = SampleBuffer::new(vec![vec![0.0; 22050], vec![0.0; 22050]], 44100);
    let report = analyze(&buffer).unwrap();
    let q = &report.quality;

    assert_eq!(q.peak, 0.0);
    assert_eq!(q.rms, 0.0);
    assert!(!q.clipping);
    assert_eq!(q.silence_ratio, 1.0);
    assert!(q.peak_level_db.is_finite());
    assert!(q.average_level_db.is_finite());
    assert!(q.signal_to_noise_db.is_finite());
    assert!(q.dynamic_range_db.is_finite());

    assert_eq!(report.spectral.dominant_frequency, 0.0);
    assert_eq!(report.speaker.gender, Gender::Unknown);
    assert_eq!(report.speaker.voice_type, VoiceType::Unknown);
    assert_eq!(report.speaker.speaking_rate_wpm, 0);
    assert_eq!(report.emotion.dominant, Emotion::Sad);
}

#[test]
fn test_sine_440_spectrum_and_pitch() {
    let sample_rate = 44100;
    let samples = sine(440.0, 0.5, sample_rate, sample_rate as usize);
    let buffer = SampleBuffer::mono(samples, sample_rate);
    let report = analyze(&buffer).unwrap();

    let resolution = sample_rate as f32 / 8192.0;
    assert!(
        (report.spectral.dominant_frequency - 440.0).abs() <= resolution,
        "dominant {}",
        report.spectral.dominant_frequency
    );
    assert!(
        (report.speaker.pitch_range.average - 440.0).abs() <= 5.0,
        "pitch {}",
        report.speaker.pitch_range.average
    );

    // A pure tone has no harmonics and a near-zero flatness
    assert!(report.spectral.harmonics.is_empty());
    assert!(report.spectral.spectral_flatness < 0.2);

    assert_eq!(report.speaker.gender, Gender::Female);
    assert_eq!(report.speaker.voice_type, VoiceType::Soprano);
    assert_eq!(report.speaker.confidence, 90.0);
}

#[test]
fn test_spectrum_covers_tone_after_leading_silence() {
    let sample_rate = 44100;
    let mut samples = vec![0.0f32; 22050];
    samples.extend(sine(440.0, 0.5, sample_rate, 66150));
    let report = analyze(&SampleBuffer::mono(samples, sample_rate)).unwrap();

    let resolution = sample_rate as f32 / FFT_SIZE as f32;
    assert!(
        (report.spectral.dominant_frequency - 440.0).abs() <= resolution,
        "dominant {}",
        report.spectral.dominant_frequency
    );
    assert!(report.spectral.spectral_centroid > 0.0);
    assert!((report.speaker.pitch_range.average - 440.0).abs() <= 5.0);
}

#[test]
fn test_low_voice_is_male() {
    let sample_rate = 16000;
    let buffer = SampleBuffer::mono(sine(110.0, 0.4, sample_rate, 16000), sample_rate);
    let report = analyze(&buffer).unwrap();

    assert!((report.speaker.pitch_range.average - 110.0).abs() < 3.0);
    assert_eq!(report.speaker.gender, Gender::Male);
    assert_eq!(report.speaker.voice_type, VoiceType::Bass);
}

#[test]
fn test_harmonic_signal_reports_harmonics() {
    let sample_rate = 44100;
    let fundamental = sine(300.0, 0.4, sample_rate, FFT_SIZE);
    let second = sine(600.0, 0.3, sample_rate, FFT_SIZE);
    let samples: Vec<f32> = fundamental.iter().zip(&second).map(|(a, b)| a + b).collect();

    let report = analyze(&SampleBuffer::mono(samples, sample_rate)).unwrap();
    assert!((report.spectral.dominant_frequency - 300.0).abs() <= 5.4);
    assert_eq!(report.spectral.harmonics.len(), 1);
    assert!(report.spectral.bandwidth_hz >= 290.0);
}

#[test]
fn test_quality_reads_only_channel_zero() {
    let left = sine(440.0, 0.5, 8000, 8000);
    let right = vec![1.0; 8000];
    let report = analyze(&SampleBuffer::new(vec![left, right], 8000)).unwrap();
    assert!(!report.quality.clipping);
    assert_abs_diff_eq!(report.quality.peak, 0.5, epsilon = 1e-2);
}

#[test]
fn test_single_sample_buffer_is_finite() {
    let report = analyze(&SampleBuffer::mono(vec![0.3], 44100)).unwrap();
    assert!(report.quality.signal_to_noise_db.is_finite());
    assert_eq!(report.speaker.pitch_range.average, 0.0);
    assert!(report.spectral.spectral_centroid.is_finite());
}

#[test]
fn test_analysis_is_deterministic() {
    let samples: Vec<f32> = (0..20000)
        .map(|i| 0.3 * ((i as f32) * 0.05).sin() + 0.1 * ((i as f32) * 0.37).cos())
        .collect();
    let buffer = SampleBuffer::mono(samples, 22050);
    assert_eq!(analyze(&buffer).unwrap(), analyze(&buffer).unwrap());
}

#[test]
fn test_invalid_buffers_rejected() {
    assert_eq!(
        analyze(&SampleBuffer::mono(Vec::new(), 44100)),
        Err(InvalidBufferError::Empty)
    );
    assert_eq!(
        analyze(&SampleBuffer::mono(vec![0.1], 0)),
        Err(InvalidBufferError::InvalidSampleRate(0))
    );
    assert!(matches!(
        analyze(&SampleBuffer::new(vec![vec![0.1; 4], vec![0.1; 3]], 8000)),
        Err(InvalidBufferError::ChannelLengthMismatch { .. })
    ));
}
