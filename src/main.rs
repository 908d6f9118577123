use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use podgen::domain::CONFIG_FILE;
use podgen::{
    AppError, OutlineRequest, PipelineVariant, PromptBundle, PromptsRequest, RunConfig,
    ScriptRequest,
};

#[derive(Parser)]
#[command(name = "podgen")]
#[command(version)]
#[command(about = "Generate podcast scripts through a staged LLM pipeline", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run against the mock client instead of the completion API.
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a research brief, outline, and engagement hooks
    #[clap(visible_alias = "o")]
    Outline {
        /// Episode topic
        #[arg(short, long)]
        topic: String,
        /// Episode duration in minutes
        #[arg(short, long)]
        duration: u32,
        /// Number of speakers
        #[arg(short, long, default_value_t = 2)]
        members: u32,
    },
    /// Synthesize the six-field prompt bundle for an episode
    #[clap(visible_alias = "p")]
    Prompts {
        /// Episode topic
        #[arg(short, long)]
        topic: String,
        /// Episode mood (e.g. curious, upbeat, serious)
        #[arg(short, long, default_value = "curious")]
        mood: String,
        /// Episode duration in minutes
        #[arg(short, long)]
        duration: u32,
    },
    /// Generate a full script from a prompt bundle
    #[clap(visible_alias = "s")]
    Script {
        /// Path to a JSON prompt bundle (as produced by `podgen prompts`)
        #[arg(short, long)]
        prompts: PathBuf,
        /// Episode topic
        #[arg(short, long)]
        topic: String,
        /// Episode duration in minutes
        #[arg(short, long)]
        duration: u32,
        /// Number of speakers
        #[arg(short, long, default_value_t = 2)]
        members: u32,
        /// Pipeline variant
        #[arg(long, value_enum, default_value_t = PipelineVariant::Segmented)]
        variant: PipelineVariant,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Input problems exit with 2, mirroring clap's usage errors;
            // everything else is a generic failure.
            if e.is_validation() { ExitCode::from(2) } else { ExitCode::FAILURE }
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = RunConfig::load(&config_path)?;

    match cli.command {
        Commands::Outline { topic, duration, members } => {
            let request = OutlineRequest { topic, duration, member_count: members };
            let result = if cli.mock {
                let ctx = podgen::build_mock_context(config)?;
                podgen::generate_outline(&ctx, &request)?
            } else {
                let ctx = podgen::build_context(config)?;
                podgen::generate_outline(&ctx, &request)?
            };
            print_json(&result)
        }
        Commands::Prompts { topic, mood, duration } => {
            let request = PromptsRequest { topic, mood, duration };
            let output = if cli.mock {
                let ctx = podgen::build_mock_context(config)?;
                podgen::generate_prompts(&ctx, &request)?
            } else {
                let ctx = podgen::build_context(config)?;
                podgen::generate_prompts(&ctx, &request)?
            };
            print_json(&output)
        }
        Commands::Script { prompts, topic, duration, members, variant } => {
            let raw = std::fs::read_to_string(&prompts)?;
            let bundle = PromptBundle::from_json(&raw)?;
            let request =
                ScriptRequest { prompts: bundle, topic, duration, member_count: members };
            let output = if cli.mock {
                let ctx = podgen::build_mock_context(config)?;
                podgen::generate_script(&ctx, &request, variant)?
            } else {
                let ctx = podgen::build_context(config)?;
                podgen::generate_script(&ctx, &request, variant)?
            };
            print_json(&output)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::validation(format!("Failed to serialize output: {e}")))?;
    println!("{rendered}");
    Ok(())
}
