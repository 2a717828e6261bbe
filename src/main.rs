use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use voice_enhancer::audio::{collect_audio_files, decode_file, write_wav};
use voice_enhancer::export::{to_json, write_json, ReportEntry};
use voice_enhancer::model::AnalysisReport;
use voice_enhancer::{analyze, enhance_and_compare, presets, EnhancementConfig};

#[derive(Parser, Debug)]
#[command(name = "voice-enhancer")]
#[command(about = "Analyze and enhance recorded speech", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute quality, spectral, speaker and emotion reports
    Analyze {
        /// Audio files or directories to analyze
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print reports as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write the JSON reports to this file
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Run the enhancement pipeline and write a WAV file
    Enhance {
        /// Input audio file
        input: String,

        /// Output WAV path
        #[arg(short = 'o', long)]
        output: String,

        /// Start from a named preset (see `presets`)
        #[arg(long)]
        preset: Option<String>,

        /// Load knobs from a JSON config file (overrides the preset)
        #[arg(long)]
        config: Option<String>,

        #[command(flatten)]
        knobs: KnobArgs,
    },

    /// List the built-in presets
    Presets,
}

/// Individual knobs; each one given overrides preset and config file
#[derive(ClapArgs, Debug)]
struct KnobArgs {
    /// Noise reduction amount (0-100)
    #[arg(long)]
    noise_reduction: Option<f32>,

    /// De-esser amount (0-100)
    #[arg(long)]
    de_esser: Option<f32>,

    /// Breath removal amount (0-100)
    #[arg(long)]
    breath_removal: Option<f32>,

    /// Click/pop removal amount (0-100)
    #[arg(long)]
    click_removal: Option<f32>,

    /// Compression amount (0-100)
    #[arg(long)]
    compression: Option<f32>,

    /// Clarity boost amount (0-100)
    #[arg(long)]
    clarity: Option<f32>,

    /// Brightness (-50 to 50)
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<f32>,

    /// Warmth (-50 to 50)
    #[arg(long, allow_hyphen_values = true)]
    warmth: Option<f32>,

    /// Normalize the output peak to 0.95
    #[arg(long)]
    normalize: bool,
}

impl KnobArgs {
    fn apply(&self, mut config: EnhancementConfig) -> EnhancementConfig {
        if let Some(v) = self.noise_reduction {
            config.noise_reduction = v;
        }
        if let Some(v) = self.de_esser {
            config.de_esser = v;
        }
        if let Some(v) = self.breath_removal {
            config.breath_removal = v;
        }
        if let Some(v) = self.click_removal {
            config.click_removal = v;
        }
        if let Some(v) = self.compression {
            config.compression = v;
        }
        if let Some(v) = self.clarity {
            config.clarity = v;
        }
        if let Some(v) = self.brightness {
            config.brightness = v;
        }
        if let Some(v) = self.warmth {
            config.warmth = v;
        }
        if self.normalize {
            config.normalize = true;
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Analyze {
            paths,
            json,
            output,
        } => run_analyze(&paths, json, output.as_deref()),
        Command::Enhance {
            input,
            output,
            preset,
            config,
            knobs,
        } => run_enhance(&input, &output, preset.as_deref(), config.as_deref(), &knobs),
        Command::Presets => {
            for p in presets::presets() {
                println!("{:<14} {}", p.name, p.description);
            }
            Ok(())
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn run_analyze(paths: &[String], json: bool, output: Option<&str>) -> Result<()> {
    let files: Vec<PathBuf> = paths
        .iter()
        .flat_map(|p| collect_audio_files(&expand(p)))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No audio files found in {:?}", paths);
    }
    log::info!("Analyzing {} file(s)...", files.len());

    // Each file is an independent call; failures are reported per file
    let results: Vec<(PathBuf, Result<ReportEntry>)> = files
        .par_iter()
        .map(|file| (file.clone(), analyze_file(file)))
        .collect();

    let mut entries = Vec::with_capacity(results.len());
    for (file, result) in results {
        match result {
            Ok(entry) => entries.push(entry),
            Err(e) => log::warn!("Analysis failed for {:?}: {:#}", file, e),
        }
    }

    if entries.is_empty() {
        anyhow::bail!("No file could be analyzed");
    }

    if let Some(path) = output {
        write_json(&expand(path), &entries)?;
    }

    if json {
        println!("{}", to_json(&entries)?);
    } else {
        for entry in &entries {
            print_summary(&entry.file, &entry.report);
        }
    }

    log::info!("Analyzed {}/{} file(s)", entries.len(), files.len());
    Ok(())
}

fn analyze_file(path: &Path) -> Result<ReportEntry> {
    let buffer = decode_file(path)?;
    let report = analyze(&buffer).with_context(|| format!("Cannot analyze {:?}", path))?;
    Ok(ReportEntry::new(path, &buffer, report))
}

fn print_summary(file: &Path, report: &AnalysisReport) {
    let q = &report.quality;
    let s = &report.spectral;
    let sp = &report.speaker;
    let e = &report.emotion;

    println!("{}", file.display());
    println!(
        "  quality   score {:.0}/100, clarity {:.0}, SNR {:.1}dB, DR {:.1}dB, \
         peak {:.1}dB, avg {:.1}dB{}",
        q.overall_score,
        q.clarity,
        q.signal_to_noise_db,
        q.dynamic_range_db,
        q.peak_level_db,
        q.average_level_db,
        if q.clipping { ", CLIPPING" } else { "" }
    );
    println!(
        "  spectrum  dominant {:.1}Hz, centroid {:.1}Hz, flatness {:.3}, \
         bandwidth {:.1}Hz, harmonics {:?}",
        s.dominant_frequency,
        s.spectral_centroid,
        s.spectral_flatness,
        s.bandwidth_hz,
        s.harmonics
    );
    println!(
        "  speaker   {} ({:.0}%), {}, pitch {:.1}-{:.1}Hz (avg {:.1}), ~{} wpm, energy {:.0}",
        sp.gender.name(),
        sp.confidence,
        sp.voice_type.name(),
        sp.pitch_range.min,
        sp.pitch_range.max,
        sp.pitch_range.average,
        sp.speaking_rate_wpm,
        sp.energy
    );
    println!("  emotion   {} ({:.0}%)", e.dominant.name(), e.confidence);
}

/// Resolve the effective config: default, then preset, then the config file
/// (only the keys it sets), then individual knob flags
fn load_config(
    preset: Option<&str>,
    config_path: Option<&str>,
    knobs: &KnobArgs,
) -> Result<EnhancementConfig> {
    let mut config = match preset {
        Some(name) => {
            let p = presets::preset(name)
                .with_context(|| format!("Unknown preset: {} (try `presets`)", name))?;
            log::info!("Using preset: {}", p.name);
            p.config
        }
        None => EnhancementConfig::default(),
    };

    if let Some(path) = config_path {
        let path = expand(path);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        config = config
            .overlay_json(&text)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        log::info!("Loaded config from {:?}", path);
    }

    Ok(knobs.apply(config))
}

fn run_enhance(
    input: &str,
    output: &str,
    preset: Option<&str>,
    config_path: Option<&str>,
    knobs: &KnobArgs,
) -> Result<()> {
    let config = load_config(preset, config_path, knobs)?;
    if config.is_identity() {
        log::warn!("All enhancement stages are disabled; output will equal input");
    }

    let input = expand(input);
    let output = expand(output);

    log::info!("Decoding {:?}...", input);
    let buffer = decode_file(&input)?;

    let outcome = enhance_and_compare(&buffer, &config)
        .with_context(|| format!("Cannot enhance {:?}", input))?;

    log::info!(
        "Quality score {:.0} -> {:.0} ({:+.1}), SNR {:+.1}dB, clarity {:+.1}, peak {:+.1}dB",
        outcome.before.overall_score,
        outcome.after.overall_score,
        outcome.delta.overall_score,
        outcome.delta.signal_to_noise_db,
        outcome.delta.clarity,
        outcome.delta.peak_level_db
    );
    if outcome.delta.clipping_resolved {
        log::info!("Clipping resolved");
    }

    write_wav(&output, &outcome.buffer)?;
    log::info!("Enhancement completed successfully!");
    Ok(())
}
