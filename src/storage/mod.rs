// src/storage/mod.rs
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::{LabPrograms, NO_PROGRAMS_FOUND};
use crate::utils::error::StorageError;

/// What the run was, recorded next to the output file.
#[derive(Debug, Clone)]
pub struct RunInfo<'a> {
    pub source_pdf: &'a Path,
    pub profile: &'a str,
    pub strategy: &'a str,
}

/// Renders the listing printed on stdout.
/// `numbered` says the entries already carry their "N. " prefix.
pub fn render_console(programs: &LabPrograms, numbered: bool) -> String {
    let mut out = String::from("Extracted Lab Programs List:\n\n");
    match programs {
        LabPrograms::NotFound => {
            let _ = writeln!(out, "1. {}\n", NO_PROGRAMS_FOUND);
        }
        LabPrograms::Programs(entries) => {
            for (i, program) in entries.iter().enumerate() {
                if numbered {
                    let _ = writeln!(out, "{}\n", program);
                } else {
                    let _ = writeln!(out, "{}. {}\n", i + 1, program);
                }
            }
        }
        LabPrograms::Sections(sections) => {
            for (n, section) in sections.iter().enumerate() {
                let _ = writeln!(out, "Lab Section {}:\n", n + 1);
                for program in section {
                    let _ = writeln!(out, "{}", program);
                }
                out.push('\n');
            }
        }
    }
    out
}

/// Renders the contents of the output text file.
pub fn render_file(programs: &LabPrograms) -> String {
    let mut out = String::new();
    match programs {
        LabPrograms::NotFound => {
            out.push_str(NO_PROGRAMS_FOUND);
            out.push_str("\n\n");
        }
        LabPrograms::Programs(entries) => {
            for program in entries {
                out.push_str(program);
                out.push_str("\n\n");
            }
        }
        LabPrograms::Sections(sections) => {
            for (n, section) in sections.iter().enumerate() {
                let _ = write!(out, "Lab Section {}:\n\n", n + 1);
                for program in section {
                    out.push_str(program);
                    out.push('\n');
                }
                out.push('\n');
            }
        }
    }
    out
}

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing to `output_path`, creating its parent directory if needed
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let output_path = output_path.as_ref().to_path_buf();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Path of the JSON metadata file, e.g. `lab_programs.txt.meta.json`
    pub fn metadata_path(&self) -> PathBuf {
        let mut name = self.output_path.as_os_str().to_os_string();
        name.push(".meta.json");
        PathBuf::from(name)
    }

    /// Writes the program listing as UTF-8 text, replacing any existing file
    pub fn save_programs(&self, programs: &LabPrograms) -> Result<PathBuf, StorageError> {
        fs::write(&self.output_path, render_file(programs)).map_err(StorageError::IoError)?;

        tracing::info!("Saved lab programs to {}", self.output_path.display());

        Ok(self.output_path.clone())
    }

    /// Saves metadata about the run in JSON format
    pub fn save_metadata(&self, programs: &LabPrograms, run: &RunInfo) -> Result<PathBuf, StorageError> {
        let file_path = self.metadata_path();

        let metadata = serde_json::json!({
            "source_pdf": run.source_pdf.display().to_string(),
            "output_file": self.output_path.display().to_string(),
            "profile": run.profile,
            "strategy": run.strategy,
            "programs_found": !matches!(programs, LabPrograms::NotFound),
            "section_count": programs.section_count(),
            "program_count": programs.program_count(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
