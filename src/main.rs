//! aigc-tag - mark WAV files as AI-generated content.
//!
//! Inserts an `AIGC` chunk carrying provenance metadata (label, producer,
//! propagator and their IDs) right after the `fmt ` chunk of a WAVE file,
//! leaving every other chunk and all audio data byte-for-byte intact.

use clap::{Args, CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use std::error::Error;
use std::io;

mod cli;

use cli::tag::{MetadataArgs, PayloadSource};

#[derive(Parser)]
#[command(name = "aigc-tag")]
#[command(about = "Embed AIGC provenance metadata into WAV files")]
#[command(version)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Also write the log to this file
    #[arg(long, global = true)]
    log_file: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert an AIGC chunk after the fmt chunk
    Tag {
        /// Input WAV files
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output path (single input only; defaults to <stem>_aigc.wav)
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<String>,
        /// Rewrite the input file itself
        #[arg(long)]
        in_place: bool,
        /// Drop existing AIGC chunks before inserting
        #[arg(long)]
        replace: bool,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Show the AIGC metadata of a file
    Info {
        /// WAV file to inspect
        file: String,
    },
    /// List the chunks of a RIFF file
    Chunks {
        /// RIFF file to inspect
        file: String,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct PayloadArgs {
    /// Raw JSON payload, stored verbatim
    #[arg(long, conflicts_with_all = ["payload_file", "label", "producer", "produce_id", "propagator", "propagate_id"])]
    payload: Option<String>,
    /// Read the payload bytes from a file
    #[arg(long, conflicts_with_all = ["label", "producer", "produce_id", "propagator", "propagate_id"])]
    payload_file: Option<String>,
    /// Label field (defaults to config)
    #[arg(long)]
    label: Option<String>,
    /// ContentProducer field (defaults to config)
    #[arg(long)]
    producer: Option<String>,
    /// ProduceID field (defaults to a new UUID per file)
    #[arg(long)]
    produce_id: Option<String>,
    /// ContentPropagator field (defaults to config)
    #[arg(long)]
    propagator: Option<String>,
    /// PropagateID field
    #[arg(long)]
    propagate_id: Option<String>,
}

impl PayloadArgs {
    fn into_source(self) -> PayloadSource {
        if let Some(json) = self.payload {
            PayloadSource::Json(json)
        } else if let Some(path) = self.payload_file {
            PayloadSource::File(path)
        } else {
            PayloadSource::Fields(MetadataArgs {
                label: self.label,
                producer: self.producer,
                produce_id: self.produce_id,
                propagator: self.propagator,
                propagate_id: self.propagate_id,
            })
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new([
            "label",
            "content_producer",
            "content_propagator",
            "reserved_code1",
            "reserved_code2",
            "output_suffix",
            "replace_existing",
        ]))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn init_logging(verbose: bool, log_file: Option<&str>) -> Result<(), Box<dyn Error>> {
    use simplelog::*;
    use std::fs::File;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            Config::default(),
            File::create(path)?,
        ));
    }
    CombinedLogger::init(loggers)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Tag {
            inputs,
            output,
            in_place,
            replace,
            payload,
        } => {
            if output.is_some() && inputs.len() > 1 {
                return Err("--output can only be used with a single input".into());
            }
            cli::tag::handle_tag(
                &inputs,
                output.as_deref(),
                in_place,
                &payload.into_source(),
                replace,
            )?;
        }
        Commands::Info { file } => {
            cli::info::handle_info(&file)?;
        }
        Commands::Chunks { file } => {
            cli::chunks::handle_chunks(&file)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
    }

    Ok(())
}
