// src/main.rs
mod config;
mod extractors;
mod pdf;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use config::{ExtractionConfig, Profile, Strategy};
use pdf::LopdfSource;
use storage::{RunInfo, StorageManager};
use utils::AppError;

/// Command Line Interface for the syllabus lab program extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Syllabus PDF to read
    #[arg(default_value = "syllabus.pdf")]
    pdf: PathBuf,

    /// Text file the extracted programs are written to (overwritten)
    #[arg(short, long, default_value = "lab_programs.txt")]
    output: PathBuf,

    /// Built-in keyword/heuristic preset
    #[arg(short, long, value_enum, default_value_t = Profile::Extended)]
    profile: Profile,

    /// Override the section strategy of the profile or config file
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// JSON extraction config file (replaces the profile)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write a JSON metadata file next to the output
    #[arg(long)]
    metadata: bool,
}

impl Args {
    fn extraction_config(&self) -> Result<ExtractionConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::from_file(path)?,
            None => ExtractionConfig::for_profile(self.profile),
        };
        if let Some(strategy) = self.strategy {
            tracing::debug!("Strategy overridden to {:?}", strategy);
            config.strategy = strategy;
        }
        Ok(config)
    }

    fn profile_label(&self) -> String {
        match &self.config {
            Some(path) => path.display().to_string(),
            None => format!("{:?}", self.profile).to_lowercase(),
        }
    }
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let config = args.extraction_config()?;
    let storage = StorageManager::new(&args.output)?;

    // 3. Pull the text out of the PDF; any failure here ends the run
    let text = pdf::extract_text(&LopdfSource, &args.pdf)?;

    // 4. Locate, clean and split
    let programs = extractors::process(&text, &config)?;
    tracing::info!(
        "Extracted {} program(s) in {} section(s)",
        programs.program_count(),
        programs.section_count()
    );

    // 5. Report
    print!("{}", storage::render_console(&programs, config.splitter.renumber));

    storage.save_programs(&programs)?;
    if args.metadata {
        let profile = args.profile_label();
        let strategy = format!("{:?}", config.strategy).to_lowercase();
        let run = RunInfo { source_pdf: &args.pdf, profile: &profile, strategy: &strategy };
        storage.save_metadata(&programs, &run)?;
    }

    tracing::info!("Processing finished. Output: {}", storage.output_path().display());
    Ok(())
}
