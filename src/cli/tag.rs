//! Tag command for embedding AIGC metadata into WAV files

use super::progress::create_progress_bar;
use aigc_tag::aigc::AigcMetadata;
use aigc_tag::config::Config;
use aigc_tag::constants::MAX_PATH_LENGTH;
use aigc_tag::tagger::{self, TagOptions, TagReport};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-field overrides for the generated metadata document
#[derive(Debug, Default, Clone)]
pub struct MetadataArgs {
    pub label: Option<String>,
    pub producer: Option<String>,
    pub produce_id: Option<String>,
    pub propagator: Option<String>,
    pub propagate_id: Option<String>,
}

/// Where the chunk payload comes from
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// JSON text given on the command line, stored verbatim
    Json(String),
    /// Raw bytes read from a file
    File(String),
    /// Built from config defaults plus flag overrides
    Fields(MetadataArgs),
}

impl PayloadSource {
    fn payload(&self, config: &Config) -> Result<Vec<u8>, Box<dyn Error>> {
        match self {
            PayloadSource::Json(text) => {
                if AigcMetadata::from_json_bytes(text.as_bytes()).is_err() {
                    log::warn!("payload is not an AIGC metadata object, storing it as given");
                }
                Ok(text.as_bytes().to_vec())
            }
            PayloadSource::File(path) => {
                let path = expand(path);
                fs::read(&path)
                    .map_err(|e| format!("Cannot read payload file {}: {e}", path.display()).into())
            }
            PayloadSource::Fields(args) => {
                let mut meta = config.metadata_template();
                if let Some(label) = &args.label {
                    meta.label = label.clone();
                }
                if let Some(producer) = &args.producer {
                    meta.content_producer = producer.clone();
                }
                if let Some(id) = &args.produce_id {
                    meta.produce_id = id.clone();
                }
                if let Some(propagator) = &args.propagator {
                    meta.content_propagator = propagator.clone();
                }
                if let Some(id) = &args.propagate_id {
                    meta.propagate_id = id.clone();
                }
                Ok(meta.to_json_bytes()?)
            }
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn validate_path_length(file: &str) -> Result<(), Box<dyn Error>> {
    if file.len() > MAX_PATH_LENGTH {
        return Err(format!(
            "{} Path too long (max {} characters)",
            "Error:".red().bold(),
            MAX_PATH_LENGTH
        )
        .into());
    }
    Ok(())
}

fn tag_one(
    input: &Path,
    output: &Path,
    source: &PayloadSource,
    config: &Config,
    options: &TagOptions,
) -> Result<TagReport, Box<dyn Error>> {
    let payload = source.payload(config)?;
    log::debug!(
        "tagging {} -> {} ({} payload bytes)",
        input.display(),
        output.display(),
        payload.len()
    );
    let report = tagger::tag_with_options(input, output, &payload, options)?;
    if !report.inserted {
        log::warn!("{} has no fmt chunk; copied without AIGC", input.display());
    }
    Ok(report)
}

pub fn handle_tag(
    inputs: &[String],
    output: Option<&str>,
    in_place: bool,
    source: &PayloadSource,
    replace: bool,
) -> Result<(), Box<dyn Error>> {
    for file in inputs.iter().map(String::as_str).chain(output) {
        validate_path_length(file)?;
    }

    let config = Config::load()?;
    config.validate()?;
    let options = TagOptions {
        replace_existing: replace || config.replace_existing,
    };

    let jobs: Vec<(PathBuf, PathBuf)> = inputs
        .iter()
        .map(|input| {
            let input = expand(input);
            let output = match output {
                _ if in_place => input.clone(),
                Some(out) => expand(out),
                None => config.output_path_for(&input),
            };
            (input, output)
        })
        .collect();

    if let [(input, output)] = jobs.as_slice() {
        println!("{} {}", "Tagging:".bright_black(), input.display().cyan());
        let report = tag_one(input, output, source, &config, &options)?;
        print_report(output, &report);
        return Ok(());
    }

    let pb = create_progress_bar(jobs.len() as u64);
    pb.set_message("tagging");

    // Each job reads and writes its own files, so jobs are independent
    let failures: Vec<(PathBuf, String)> = jobs
        .par_iter()
        .filter_map(|(input, output)| {
            let result = tag_one(input, output, source, &config, &options);
            pb.inc(1);
            match result {
                Ok(_) => None,
                Err(e) => {
                    log::error!("{}: {e}", input.display());
                    Some((input.clone(), e.to_string()))
                }
            }
        })
        .collect();
    pb.finish_and_clear();

    let tagged = jobs.len() - failures.len();
    println!(
        "{} Tagged {} of {} files",
        "✓".green().bold(),
        tagged.to_string().green(),
        jobs.len()
    );

    if failures.is_empty() {
        return Ok(());
    }
    for (input, err) in &failures {
        println!("  {} {}: {}", "✗".red(), input.display(), err.bright_black());
    }
    Err(format!("{} file(s) failed to tag", failures.len()).into())
}

fn print_report(output: &Path, report: &TagReport) {
    if report.inserted {
        println!(
            "{} Tagged file created: {}",
            "✓".green().bold(),
            output.display().to_string().yellow()
        );
    } else {
        println!(
            "{} No fmt chunk found, file copied unchanged: {}",
            "!".yellow(),
            output.display().to_string().yellow()
        );
    }
    if report.removed > 0 {
        println!(
            "  {} Replaced {} existing AIGC chunk(s)",
            "→".bright_black(),
            report.removed
        );
    }
    println!(
        "  {} {} chunks, RIFF size {}",
        "→".bright_black(),
        report.chunk_count,
        report.riff_size.to_string().bright_black()
    );
}
