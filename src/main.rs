use anyhow::{Context, Result};
use clap::Parser;
use freq432::service::intake::is_audio_path;
use freq432::service::{FileReport, FrequencyPipeline, Outcome, ServiceConfig};
use freq432::SymphoniaDecoder;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "freq432")]
#[command(about = "Report the dominant frequency of audio files and whether it is close to 432 Hz", long_about = None)]
struct Args {
    /// Audio files or directories to analyze
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Maximum accepted file size in MB (0 = unlimited)
    #[arg(long, default_value = "20")]
    max_size_mb: usize,

    /// Tolerance around 432 Hz, in Hz
    #[arg(long, default_value = "5")]
    tolerance: f64,

    /// Accept files whose extension is not a known audio type
    #[arg(long)]
    any_type: bool,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Expand `~` and walk directories for audio files
fn collect_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(shellexpand::tilde(input).as_ref());

        if path.is_dir() {
            let before = files.len();
            for entry in WalkDir::new(&path).follow_links(true).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to scan directory: {:?}", path))?;
                if entry.file_type().is_file() && is_audio_path(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            log::debug!("Found {} audio file(s) in {:?}", files.len() - before, path);
        } else {
            files.push(path);
        }
    }

    Ok(files)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let files = collect_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No audio files found in: {:?}", args.inputs);
    }

    let max_upload_bytes = match args.max_size_mb {
        0 => None,
        mb => Some(mb * 1024 * 1024),
    };
    let config = ServiceConfig::new()
        .with_max_upload_bytes(max_upload_bytes)
        .with_audio_type_check(!args.any_type)
        .with_tolerance(args.tolerance);

    let pipeline = FrequencyPipeline::new(config, SymphoniaDecoder::new());
    let results = pipeline.analyze_files(&files);

    let mut failures = 0;
    for (path, result) in &results {
        if let Err(e) = result {
            failures += 1;
            log::warn!("{:?}: {}", path, e);
        }

        if args.json {
            let report = FileReport {
                file: path.display().to_string(),
                outcome: Outcome::from(result),
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            match result {
                Ok(r) => println!(
                    "{}: {} ({})",
                    path.display(),
                    r.formatted_frequency(),
                    if r.is_close_to_432hz {
                        "close to 432Hz"
                    } else {
                        "not close to 432Hz"
                    }
                ),
                Err(e) => println!("{}: error {}: {}", path.display(), e.status_code(), e.public_detail()),
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) could not be analyzed", failures, results.len());
    }

    Ok(())
}
